pub mod models;
pub mod service;
pub mod session;
pub mod config;
pub mod error;
pub mod logging;
pub mod bootstrap;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;

pub use config::Config;
pub use error::{CredentialError, Error, QueryError, Result, SessionError};
pub use service::{CredentialManager, RecordingQueryEngine, StreamResolver};
pub use session::{Player, PlayerConfig, PlayerError, SessionManager, SessionOutcome};
