//! Google Gemini `generateContent` client.
//!
//! Posts one user turn to `{base}/models/{model}:generateContent` and reads
//! back the first candidate. Request building and reply parsing are plain
//! functions so they can be tested without a network.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::LlmConfig;
use super::types::{Completer, Completion, LlmError};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    url: String,
    model: String,
    max_output_tokens: u32,
}

impl GeminiClient {
    /// Build from environment variables; see [`LlmConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Missing API key or an HTTP client that fails to build.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(LlmConfig::from_env()?)
    }

    /// # Errors
    ///
    /// [`LlmError::ClientBuild`] if reqwest rejects the timeouts or TLS setup.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let LlmConfig { api_key, model, base_url, max_output_tokens, timeouts } = config;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::ClientBuild(e.to_string()))?;
        let url = format!("{base_url}/models/{model}:generateContent");
        Ok(Self { http, api_key, url, model, max_output_tokens })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl Completer for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<Completion, LlmError> {
        let response = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&build_request(prompt, self.max_output_tokens))
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(LlmError::Status { status: status.as_u16(), body });
        }

        parse_response(&body, &self.model)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [UserTurn<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct UserTurn<'a> {
    role: &'static str,
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
    /// Set on reasoning parts of thinking models; never part of the answer.
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

// =============================================================================
// BUILD / PARSE
// =============================================================================

fn build_request(prompt: &str, max_output_tokens: u32) -> GenerateRequest<'_> {
    GenerateRequest {
        contents: [UserTurn { role: "user", parts: [TextPart { text: prompt }] }],
        generation_config: GenerationConfig { max_output_tokens },
    }
}

fn parse_response(json: &str, requested_model: &str) -> Result<Completion, LlmError> {
    let reply: GenerateResponse = serde_json::from_str(json).map_err(|e| LlmError::Decode(e.to_string()))?;
    let candidate = reply
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::Decode("no candidates in reply".to_string()))?;

    let text = candidate
        .content
        .into_iter()
        .flat_map(|content| content.parts)
        .filter(|part| !part.thought)
        .filter_map(|part| part.text)
        .collect::<String>();
    let usage = reply.usage_metadata.unwrap_or_default();

    Ok(Completion {
        text,
        model: reply.model_version.unwrap_or_else(|| requested_model.to_string()),
        finish_reason: candidate.finish_reason.unwrap_or_else(|| "STOP".to_string()),
        input_tokens: usage.prompt_token_count,
        output_tokens: usage.candidates_token_count,
    })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
