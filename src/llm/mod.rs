//! LLM: the text-completion collaborator behind the AI operation.
//!
//! DESIGN
//! ======
//! Gemini is the only provider. `main` builds a [`GeminiClient`] from the
//! environment; the rest of the crate sees it only as a [`Completer`], so
//! tests swap in a mock.

pub mod config;
pub mod gemini;
pub mod types;

pub use gemini::GeminiClient;
pub use types::Completer;
