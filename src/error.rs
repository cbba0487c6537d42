//! Shared error plumbing.
//!
//! Every error enum in the crate implements [`ErrorCode`] so failures can be
//! logged and returned with a stable, grepable code next to the
//! human-readable message.

/// Grepable error code and retryable flag for structured error bodies.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
