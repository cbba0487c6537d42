//! Completion types: what the AI operation sends and gets back.
//!
//! One prompt goes out, one block of text comes back. Nothing else about the
//! provider leaks past this module.

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// No usable key in the environment.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// Connection, timeout or body read failure.
    #[error("LLM transport failed: {0}")]
    Transport(String),

    #[error("LLM returned status {status}")]
    Status { status: u16, body: String },

    /// The reply was not the JSON shape we expect.
    #[error("LLM reply unreadable: {0}")]
    Decode(String),

    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

impl crate::error::ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::Transport(_) => "E_LLM_TRANSPORT",
            Self::Status { .. } => "E_LLM_STATUS",
            Self::Decode(_) => "E_LLM_DECODE",
            Self::ClientBuild(_) => "E_LLM_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status == 429 || (500..600).contains(status),
            Self::MissingApiKey { .. } | Self::Decode(_) | Self::ClientBuild(_) => false,
        }
    }
}

// =============================================================================
// COMPLETION
// =============================================================================

/// The text of one reply plus the bookkeeping we log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub model: String,
    pub finish_reason: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Single-prompt text completion. `AppState` holds one behind an `Arc`, and
/// tests substitute a mock.
#[async_trait::async_trait]
pub trait Completer: Send + Sync {
    /// Send `prompt` as the only user turn and return the reply.
    ///
    /// # Errors
    ///
    /// Any [`LlmError`] raised by the transport or while reading the reply.
    async fn complete(&self, prompt: &str) -> Result<Completion, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
