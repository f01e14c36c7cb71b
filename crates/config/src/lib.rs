//! Configuration loading for second-opinion.
//!
//! Two concerns live here:
//! - [`credentials`] — layered secret resolution (`.env.local`, `.env`,
//!   process environment)
//! - [`Settings`] — non-secret knobs read from environment variables
//!   with built-in defaults

pub mod credentials;
pub mod env_file;

pub use credentials::{CredentialResolver, SecretValue, Secrets, SourceLayer};

use std::time::Duration;

/// Secret holding the bearer token for the responses endpoint.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Overrides the default model identifier.
pub const MODEL_VAR: &str = "SECOND_OPINION_MODEL";
/// Overrides the default timeout, in milliseconds.
pub const TIMEOUT_VAR: &str = "SECOND_OPINION_TIMEOUT";
/// Overrides the API base URL.
pub const BASE_URL_VAR: &str = "SECOND_OPINION_BASE_URL";

pub const DEFAULT_MODEL: &str = "gpt-5-pro-2025-10-06";
pub const DEFAULT_TIMEOUT_MS: u64 = 1_800_000;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Runtime settings for one consultation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub model: String,
    pub timeout: Duration,
    pub base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            base_url: DEFAULT_BASE_URL.into(),
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through `lookup`. Unset or empty variables keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut settings = Self::default();

        if let Some(model) = get(MODEL_VAR) {
            settings.model = model;
        }

        if let Some(raw) = get(TIMEOUT_VAR) {
            settings.timeout = Duration::from_millis(parse_timeout_ms(TIMEOUT_VAR, &raw)?);
        }

        if let Some(base_url) = get(BASE_URL_VAR) {
            settings.base_url = base_url;
        }

        tracing::debug!(
            model = %settings.model,
            timeout_ms = settings.timeout.as_millis() as u64,
            base_url = %settings.base_url,
            "Settings loaded"
        );

        Ok(settings)
    }
}

/// Parse a positive millisecond count.
pub fn parse_timeout_ms(name: &str, raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            name: name.into(),
            value: raw.into(),
            reason: "must be greater than zero".into(),
        }),
        Ok(ms) => Ok(ms),
        Err(e) => Err(ConfigError::InvalidValue {
            name: name.into(),
            value: raw.into(),
            reason: e.to_string(),
        }),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "Missing required environment variables: {}\nSet them in {}.",
        .names.join(", "),
        .searched.join(", ")
    )]
    MissingSecrets {
        names: Vec<String>,
        searched: Vec<String>,
    },

    #[error("Invalid value for {name} ({value:?}): {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

impl From<ConfigError> for second_opinion_core::Error {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}
