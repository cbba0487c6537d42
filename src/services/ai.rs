//! AI service: one question in, one (trimmed) word out.
//!
//! DESIGN
//! ======
//! Wraps the caller's question in a fixed instruction asking for a single
//! word, sends it to the configured LLM as the only user turn, and returns the
//! reply text trimmed. The reply is not checked for being one word; whatever
//! the model says is passed through.

use tracing::{error, info};

use crate::error::ErrorCode;
use crate::llm::Completer;
use crate::llm::types::LlmError;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("Empty AI question")]
    EmptyQuestion,
    #[error("LLM not configured")]
    LlmNotConfigured,
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl ErrorCode for AiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyQuestion => "E_AI_EMPTY_QUESTION",
            Self::LlmNotConfigured => "E_LLM_NOT_CONFIGURED",
            Self::Llm(_) => "E_LLM_ERROR",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Llm(e) if e.retryable())
    }
}

// =============================================================================
// PROMPT
// =============================================================================

/// Instruction sent ahead of every question.
#[must_use]
pub fn build_prompt(question: &str) -> String {
    format!(
        "Answer the question using ONLY ONE WORD.\n\
         Do not add explanations or punctuation.\n\
         \n\
         Question: {question}"
    )
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Ask the LLM `question` and return its trimmed reply.
///
/// # Errors
///
/// [`AiError::EmptyQuestion`] for blank input (checked before the LLM is
/// consulted), [`AiError::LlmNotConfigured`] when `llm` is `None`, and
/// [`AiError::Llm`] when the provider call fails.
pub async fn answer(llm: Option<&dyn Completer>, question: &str) -> Result<String, AiError> {
    if question.trim().is_empty() {
        return Err(AiError::EmptyQuestion);
    }
    let llm = llm.ok_or(AiError::LlmNotConfigured)?;

    info!(question_len = question.len(), "ai: question received");
    let completion = llm.complete(&build_prompt(question)).await.map_err(|e| {
        error!(error = %e, code = e.error_code(), "ai: llm call failed");
        AiError::from(e)
    })?;

    info!(
        model = %completion.model,
        finish_reason = %completion.finish_reason,
        input_tokens = completion.input_tokens,
        output_tokens = completion.output_tokens,
        "ai: answer received"
    );
    Ok(completion.text.trim().to_string())
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
