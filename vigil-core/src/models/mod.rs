pub mod credential;
pub mod recording;
pub mod session;

pub use credential::Credential;
pub use recording::{RecordKind, RecordingItem, RecordingPage, RecordingQuery, RecordingSource};
pub use session::{PlaybackMode, SessionState, SessionSummary, SessionTarget, ViewerClass};
