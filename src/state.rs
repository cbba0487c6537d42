//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It is
//! built once at startup from [`AppConfig`] and never mutated afterwards, so
//! concurrent requests share it without locking.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::llm::Completer;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    /// Operator identity echoed in every response.
    pub official_email: Arc<str>,
    /// Optional LLM client. `None` if no API key was configured.
    pub llm: Option<Arc<dyn Completer>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: &AppConfig, llm: Option<Arc<dyn Completer>>) -> Self {
        Self { official_email: Arc::from(config.official_email.as_str()), llm }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
