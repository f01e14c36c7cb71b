//! Provider-facing domain types — what one bounded call yields.
//!
//! A call produces exactly one [`InvocationOutcome`]. A successful body is
//! then reduced to an [`ExtractedResult`] by the response extractor.

use crate::error::ProviderError;

/// Answer text used when no recognizable text is found in a response.
pub const NO_RESPONSE_PLACEHOLDER: &str = "No response generated";

/// The single terminal result of one bounded network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// 2xx response; carries the raw body.
    Success(String),
    /// Non-2xx response; the body is read fully before reporting.
    HttpFailure { status: u16, body: String },
    /// The deadline elapsed before the call completed.
    Timeout { after_ms: u64 },
    /// Connection-level failure other than the deadline.
    TransportError(String),
}

impl InvocationOutcome {
    /// Split into the success body or the matching [`ProviderError`].
    pub fn into_result(self) -> std::result::Result<String, ProviderError> {
        match self {
            Self::Success(body) => Ok(body),
            Self::HttpFailure { status, body } => Err(ProviderError::Api { status, body }),
            Self::Timeout { after_ms } => Err(ProviderError::Timeout { after_ms }),
            Self::TransportError(message) => Err(ProviderError::Network(message)),
        }
    }
}

/// A web source the remote service consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub url: String,
    pub title: Option<String>,
}

impl Citation {
    /// The title, or the URL when the title is absent.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.url)
    }
}

/// Human-readable answer text plus ordered citations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedResult {
    pub text: String,
    pub citations: Vec<Citation>,
}

impl ExtractedResult {
    /// The degraded result: placeholder text, no citations.
    pub fn placeholder() -> Self {
        Self {
            text: NO_RESPONSE_PLACEHOLDER.into(),
            citations: Vec::new(),
        }
    }
}
