pub mod manager;
pub mod player;

pub use manager::{SessionManager, SessionOutcome};
pub use player::{Player, PlayerConfig, PlayerError};
