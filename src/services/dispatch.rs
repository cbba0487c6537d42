//! Request dispatcher: typed request → per-operation handlers → one result.
//!
//! DESIGN
//! ======
//! A request is a fixed set of optional operations. Parsing rejects unknown
//! keys and ill-typed values up front; dispatch then runs every present
//! operation in declaration order (fibonacci, prime, lcm, hcf, AI) and stops
//! at the first failure. Nothing computed before a failure is returned.
//!
//! Errors are classified by [`ErrorKind`]. Only [`ErrorKind::Server`] errors
//! hide their message from the caller.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::ai::{self, AiError};
use super::compute::{self, ComputeError};
use crate::error::ErrorCode;
use crate::llm::Completer;

/// Recognized request keys, in dispatch order.
pub const OPERATIONS: [&str; 5] = ["fibonacci", "prime", "lcm", "hcf", "AI"];

/// Message returned in place of any server-side failure.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

// =============================================================================
// ERRORS
// =============================================================================

/// Caller-facing classification of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed body, empty payload or unknown key.
    BadRequest,
    /// A recognized operation refused its input.
    Validation,
    /// Anything else. Details stay in the logs.
    Server,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Invalid request body")]
    InvalidBody(String),
    #[error("No input provided")]
    NoInput,
    #[error("Invalid input key: {0}")]
    UnknownKey(String),
    #[error("Invalid {0} input")]
    InvalidField(&'static str),
    #[error(transparent)]
    Compute(#[from] ComputeError),
    #[error(transparent)]
    Ai(#[from] AiError),
}

impl DispatchError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidBody(_) | Self::NoInput | Self::UnknownKey(_) => ErrorKind::BadRequest,
            Self::InvalidField(_) | Self::Compute(_) | Self::Ai(AiError::EmptyQuestion) => ErrorKind::Validation,
            Self::Ai(AiError::LlmNotConfigured | AiError::Llm(_)) => ErrorKind::Server,
        }
    }

    /// Message safe to show the caller.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Server => SERVER_ERROR_MESSAGE.to_string(),
            ErrorKind::BadRequest | ErrorKind::Validation => self.to_string(),
        }
    }
}

impl ErrorCode for DispatchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidBody(_) => "E_INVALID_BODY",
            Self::NoInput => "E_NO_INPUT",
            Self::UnknownKey(_) => "E_UNKNOWN_KEY",
            Self::InvalidField(_) => "E_INVALID_FIELD",
            Self::Compute(e) => e.error_code(),
            Self::Ai(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Ai(e) if e.retryable())
    }
}

// =============================================================================
// REQUEST / RESULT
// =============================================================================

/// One optional field per operation. `null` values count as absent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    pub fibonacci: Option<i64>,
    pub prime: Option<Vec<i64>>,
    pub lcm: Option<Vec<i64>>,
    pub hcf: Option<Vec<i64>>,
    pub ai: Option<String>,
}

/// Per-operation results; absent operations are omitted when serialized.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fibonacci: Option<Vec<u128>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prime: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lcm: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hcf: Option<i64>,
    #[serde(rename = "AI", skip_serializing_if = "Option::is_none")]
    pub ai: Option<String>,
}

impl ProcessRequest {
    /// Parse a raw JSON body.
    ///
    /// # Errors
    ///
    /// [`DispatchError::InvalidBody`] unless the body is a JSON object,
    /// [`DispatchError::UnknownKey`] for the first unrecognized key and
    /// [`DispatchError::InvalidField`] for the first recognized key (in
    /// dispatch order) whose value has the wrong type.
    pub fn from_json(body: &[u8]) -> Result<Self, DispatchError> {
        let mut object: Map<String, Value> =
            serde_json::from_slice(body).map_err(|e| DispatchError::InvalidBody(e.to_string()))?;

        if let Some(key) = object.keys().find(|key| !OPERATIONS.contains(&key.as_str())) {
            return Err(DispatchError::UnknownKey(key.clone()));
        }

        Ok(Self {
            fibonacci: take_field(&mut object, "fibonacci")?,
            prime: take_field(&mut object, "prime")?,
            lcm: take_field(&mut object, "lcm")?,
            hcf: take_field(&mut object, "hcf")?,
            ai: take_field(&mut object, "AI")?,
        })
    }

    /// Names of the operations present, in dispatch order.
    #[must_use]
    pub fn operations(&self) -> Vec<&'static str> {
        let present = [
            self.fibonacci.is_some(),
            self.prime.is_some(),
            self.lcm.is_some(),
            self.hcf.is_some(),
            self.ai.is_some(),
        ];
        OPERATIONS
            .iter()
            .zip(present)
            .filter_map(|(name, present)| present.then_some(*name))
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations().is_empty()
    }
}

fn take_field<T>(object: &mut Map<String, Value>, key: &'static str) -> Result<Option<T>, DispatchError>
where
    T: serde::de::DeserializeOwned,
{
    match object.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|_| DispatchError::InvalidField(key)),
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Run every present operation in dispatch order.
///
/// # Errors
///
/// [`DispatchError::NoInput`] when no operation is present, otherwise the
/// first error raised by an operation.
pub async fn dispatch(request: ProcessRequest, llm: Option<&dyn Completer>) -> Result<ProcessData, DispatchError> {
    if request.is_empty() {
        return Err(DispatchError::NoInput);
    }
    debug!(operations = ?request.operations(), "dispatch: start");

    let mut data = ProcessData::default();
    if let Some(n) = request.fibonacci {
        data.fibonacci = Some(compute::fibonacci(n)?);
    }
    if let Some(values) = &request.prime {
        data.prime = Some(compute::primes(values));
    }
    if let Some(values) = &request.lcm {
        data.lcm = Some(compute::lcm(values)?);
    }
    if let Some(values) = &request.hcf {
        data.hcf = Some(compute::hcf(values)?);
    }
    if let Some(question) = &request.ai {
        data.ai = Some(ai::answer(llm, question).await?);
    }
    Ok(data)
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod tests;
