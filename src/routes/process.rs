//! `POST /process`: parse, dispatch, wrap.
//!
//! The body is read as raw bytes and parsed by
//! [`ProcessRequest::from_json`] so that malformed bodies and unknown keys
//! map to 400 instead of Axum's default JSON rejections.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::{error, warn};

use crate::error::ErrorCode;
use crate::services::dispatch::{self, DispatchError, ErrorKind, ProcessData, ProcessRequest};
use crate::state::AppState;

/// Public code for every server-side failure.
const SERVER_ERROR_CODE: &str = "E_SERVER_ERROR";

// =============================================================================
// RESPONSE BODIES
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub is_success: bool,
    pub official_email: String,
    pub data: ProcessData,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub is_success: bool,
    pub official_email: String,
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub code: &'static str,
    pub message: String,
}

// =============================================================================
// HANDLER
// =============================================================================

/// `POST /process`: run every operation present in the body.
pub async fn process(State(state): State<AppState>, body: Bytes) -> Response {
    match run(&state, &body).await {
        Ok(data) => Json(ProcessResponse { is_success: true, official_email: state.official_email.to_string(), data })
            .into_response(),
        Err(e) => error_response(&state, &e),
    }
}

async fn run(state: &AppState, body: &[u8]) -> Result<ProcessData, DispatchError> {
    let request = ProcessRequest::from_json(body)?;
    dispatch::dispatch(request, state.llm.as_deref()).await
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

pub(crate) fn error_kind_to_status(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Server => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(state: &AppState, err: &DispatchError) -> Response {
    let kind = err.kind();
    let status = error_kind_to_status(kind);
    let code = if kind == ErrorKind::Server {
        error!(code = err.error_code(), retryable = err.retryable(), error = %err, "process: request failed");
        SERVER_ERROR_CODE
    } else {
        warn!(code = err.error_code(), error = ?err, "process: request rejected");
        err.error_code()
    };

    let body = ErrorResponse {
        is_success: false,
        official_email: state.official_email.to_string(),
        error: ErrorBody { status: status.as_u16(), code, message: err.public_message() },
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
#[path = "process_test.rs"]
mod tests;
