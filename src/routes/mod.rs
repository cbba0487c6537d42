//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two endpoints behind one Axum router: `POST /process` runs the requested
//! operations and `GET /health` echoes the operator identity. CORS is open
//! and every request gets a `tower_http` trace span.

pub mod process;

use axum::Router;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/process", post(process::process))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub is_success: bool,
    pub official_email: String,
}

/// `GET /health`: always succeeds.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse { is_success: true, official_email: state.official_email.to_string() })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
