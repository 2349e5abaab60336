use thiserror::Error;
use vigil_providers::platform::codes;
use vigil_providers::PlatformError;

pub use crate::validation::ValidationError;

/// Credential acquisition failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Invalid app key or secret: {0}")]
    InvalidKeys(String),

    #[error("Credential endpoint unreachable: {0}")]
    NetworkFailure(String),

    #[error("Credential request rejected: {reason}")]
    UpstreamRejected { code: String, reason: String },
}

impl CredentialError {
    /// Whether the platform itself answered (as opposed to a transport failure)
    #[must_use]
    pub const fn is_upstream_verdict(&self) -> bool {
        matches!(self, Self::InvalidKeys(_) | Self::UpstreamRejected { .. })
    }
}

impl From<PlatformError> for CredentialError {
    fn from(err: PlatformError) -> Self {
        match &err {
            PlatformError::Api { code, .. } if codes::is_invalid_app_key(code) => {
                Self::InvalidKeys(err.reason())
            }
            PlatformError::Api { code, .. } => Self::UpstreamRejected {
                code: code.clone(),
                reason: err.reason(),
            },
            PlatformError::Network(msg) => Self::NetworkFailure(msg.clone()),
            PlatformError::Parse(msg) => Self::UpstreamRejected {
                code: String::new(),
                reason: format!("malformed response: {msg}"),
            },
            PlatformError::InvalidConfig(msg) | PlatformError::InvalidHeader(msg) => {
                Self::InvalidKeys(msg.clone())
            }
        }
    }
}

/// Recording search failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid time range: {0}")]
    InvalidTimeRange(#[from] ValidationError),

    #[error("Recording search failed: {reason}")]
    Upstream { code: String, reason: String },

    #[error("Recording search unreachable: {0}")]
    Network(String),

    #[error("Malformed recording response: {0}")]
    Parse(String),

    #[error("Invalid recording request: {0}")]
    InvalidRequest(String),
}

impl QueryError {
    /// Whether the credential was rejected and should be re-acquired
    #[must_use]
    pub fn is_credential_rejected(&self) -> bool {
        matches!(self, Self::Upstream { code, .. } if codes::is_credential_rejection(code))
    }
}

impl From<PlatformError> for QueryError {
    fn from(err: PlatformError) -> Self {
        match &err {
            PlatformError::Api { code, .. } => Self::Upstream {
                code: code.clone(),
                reason: err.reason(),
            },
            PlatformError::Network(msg) => Self::Network(msg.clone()),
            PlatformError::Parse(msg) => Self::Parse(msg.clone()),
            PlatformError::InvalidConfig(msg) | PlatformError::InvalidHeader(msg) => {
                Self::InvalidRequest(msg.clone())
            }
        }
    }
}

/// Session failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Stream address unavailable: {reason}")]
    Resolution { code: Option<String>, reason: String },

    #[error("Player could not be created: {0}")]
    HandleConstruction(String),

    #[error("Playback requires a recording")]
    MissingRecording,
}

impl SessionError {
    /// Whether the credential was rejected and should be re-acquired
    #[must_use]
    pub fn is_credential_rejected(&self) -> bool {
        matches!(
            self,
            Self::Resolution { code: Some(code), .. } if codes::is_credential_rejection(code)
        )
    }
}

impl From<PlatformError> for SessionError {
    fn from(err: PlatformError) -> Self {
        Self::Resolution {
            code: err.code().map(str::to_string),
            reason: err.reason(),
        }
    }
}

/// Crate-level error
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
