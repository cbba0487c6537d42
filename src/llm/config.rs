//! Gemini settings read from the environment once at startup.

use std::str::FromStr;

use super::types::LlmError;

pub const DEFAULT_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Cap on reply length sent with every request (`maxOutputTokens`).
    pub max_output_tokens: u32,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Read the key plus optional overrides:
    ///
    /// - `LLM_API_KEY_ENV`: name of the variable holding the key (default `GEMINI_API_KEY`)
    /// - `LLM_MODEL`, `LLM_BASE_URL`
    /// - `AI_MAX_TOKENS` (default 4096)
    /// - `LLM_REQUEST_TIMEOUT_SECS` (120), `LLM_CONNECT_TIMEOUT_SECS` (10)
    ///
    /// Numeric overrides that do not parse, or are zero, keep their default.
    ///
    /// # Errors
    ///
    /// [`LlmError::MissingApiKey`] when the key variable is unset or blank.
    pub fn from_env() -> Result<Self, LlmError> {
        let key_var = std::env::var("LLM_API_KEY_ENV").unwrap_or_else(|_| DEFAULT_API_KEY_VAR.to_string());
        let Some(api_key) = std::env::var(&key_var).ok().filter(|key| !key.trim().is_empty()) else {
            return Err(LlmError::MissingApiKey { var: key_var });
        };

        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url = std::env::var("LLM_BASE_URL")
            .map_or_else(|_| super::gemini::DEFAULT_BASE_URL.to_string(), |url| url.trim_end_matches('/').to_string());

        Ok(Self {
            api_key,
            model,
            base_url,
            max_output_tokens: env_or("AI_MAX_TOKENS", DEFAULT_MAX_OUTPUT_TOKENS),
            timeouts: LlmTimeouts {
                request_secs: env_or("LLM_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: env_or("LLM_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            },
        })
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + PartialEq + Default,
{
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .filter(|value| *value != T::default())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
