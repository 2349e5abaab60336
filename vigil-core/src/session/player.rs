//! Player seam
//!
//! The manager only creates and destroys handles; what a handle renders to
//! is up to the implementation.

use std::fmt;
use std::sync::Arc;

use crate::models::credential::mask;

/// Everything a player needs to start a stream on a surface
#[derive(Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Rendering surface the handle binds to
    pub surface_id: String,
    pub stream_url: String,
    /// Layout template identifier
    pub template: String,
    pub access_token: String,
}

impl fmt::Debug for PlayerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerConfig")
            .field("surface_id", &self.surface_id)
            .field("stream_url", &self.stream_url)
            .field("template", &self.template)
            .field("access_token", &mask(&self.access_token))
            .finish()
    }
}

/// Player construction failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct PlayerError(pub String);

impl PlayerError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Creates and destroys player handles.
///
/// Both calls are synchronous; `destroy` must release the surface before it
/// returns so the next `create` can bind it.
pub trait Player: Send + Sync {
    type Handle: Send;

    fn create(&self, config: &PlayerConfig) -> Result<Self::Handle, PlayerError>;

    fn destroy(&self, handle: Self::Handle);
}

impl<P: Player + ?Sized> Player for Arc<P> {
    type Handle = P::Handle;

    fn create(&self, config: &PlayerConfig) -> Result<Self::Handle, PlayerError> {
        (**self).create(config)
    }

    fn destroy(&self, handle: Self::Handle) {
        (**self).destroy(handle);
    }
}
