//! Video Platform Vendor Client Error Types
//!
//! Pure vendor errors, no dependency on the core error taxonomy

use thiserror::Error;

use super::codes;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (code {code}): {message}")]
    Api { code: String, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

impl PlatformError {
    /// Vendor status code, if the platform answered with one
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Human-readable reason.
    ///
    /// Vendor failures go through the code table so callers never see a bare
    /// code; everything else uses the error's own message.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Api { code, .. } => codes::describe(code).into_owned(),
            other => other.to_string(),
        }
    }

    /// Whether the platform rejected the access token itself
    #[must_use]
    pub fn is_credential_rejected(&self) -> bool {
        self.code().is_some_and(codes::is_credential_rejection)
    }
}

impl From<reqwest::Error> for PlatformError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PlatformError::Parse(err.to_string())
        } else {
            PlatformError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PlatformError {
    fn from(err: serde_json::Error) -> Self {
        PlatformError::Parse(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for PlatformError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        PlatformError::InvalidHeader(err.to_string())
    }
}
