pub mod credential;
pub mod recording;
pub mod stream;

pub use credential::CredentialManager;
pub use recording::RecordingQueryEngine;
pub use stream::StreamResolver;
