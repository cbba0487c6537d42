//! Process configuration parsed from environment variables.
//!
//! Built once in `main` and handed to [`crate::state::AppState`]. LLM
//! settings live in [`crate::llm::config`] because a missing key there only
//! disables the AI operation instead of aborting startup.

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

impl crate::error::ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Missing(_) => "E_CONFIG_MISSING",
            Self::Invalid { .. } => "E_CONFIG_INVALID",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Identity string returned in every response body.
    pub official_email: String,
    pub port: u16,
}

impl AppConfig {
    /// Build config from `OFFICIAL_EMAIL` (required) and `PORT` (default 3000).
    ///
    /// # Errors
    ///
    /// Returns an error if `OFFICIAL_EMAIL` is unset or blank, or `PORT` is
    /// not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let official_email = std::env::var("OFFICIAL_EMAIL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("OFFICIAL_EMAIL"))?;

        let port = match std::env::var("PORT") {
            Ok(raw) => match raw.trim().parse::<u16>() {
                Ok(port) => port,
                Err(_) => return Err(ConfigError::Invalid { var: "PORT", value: raw }),
            },
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self { official_email, port })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
