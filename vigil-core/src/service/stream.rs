//! Stream address resolution for live and playback sessions

use std::sync::Arc;

use vigil_providers::platform::{LiveAddressRequest, PlaybackAddressRequest};
use vigil_providers::VideoPlatform;

use crate::error::SessionError;
use crate::models::{Credential, PlaybackMode, SessionTarget};

/// Live endpoint `type` value
const LIVE_KIND: u8 = 1;

/// Resolves a session target to a playable stream URL
#[derive(Clone)]
pub struct StreamResolver {
    platform: Arc<dyn VideoPlatform>,
    protocol: u8,
    quality: u8,
}

impl std::fmt::Debug for StreamResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamResolver")
            .field("platform", &self.platform.endpoint())
            .field("protocol", &self.protocol)
            .field("quality", &self.quality)
            .finish()
    }
}

impl StreamResolver {
    /// HLS
    pub const DEFAULT_PROTOCOL: u8 = 2;
    /// High definition
    pub const DEFAULT_QUALITY: u8 = 1;

    #[must_use]
    pub fn new(platform: Arc<dyn VideoPlatform>) -> Self {
        Self {
            platform,
            protocol: Self::DEFAULT_PROTOCOL,
            quality: Self::DEFAULT_QUALITY,
        }
    }

    #[must_use]
    pub fn with_protocol(mut self, protocol: u8) -> Self {
        self.protocol = protocol;
        self
    }

    #[must_use]
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Resolve the stream URL for `target`
    pub async fn resolve(
        &self,
        credential: &Credential,
        target: &SessionTarget,
    ) -> Result<String, SessionError> {
        let address = match target.mode {
            PlaybackMode::Live => {
                let request = LiveAddressRequest {
                    access_token: credential.token().to_string(),
                    device_serial: target.camera_id.clone(),
                    channel_no: target.channel,
                    protocol: self.protocol,
                    quality: self.quality,
                    kind: LIVE_KIND,
                };
                self.platform.live_address(&request).await?
            }
            PlaybackMode::Playback => {
                let recording = target.recording.as_ref().ok_or(SessionError::MissingRecording)?;
                let source = recording.source;
                let request = PlaybackAddressRequest {
                    access_token: credential.token().to_string(),
                    device_serial: target.camera_id.clone(),
                    channel_no: target.channel,
                    start_time: source.encode_instant(&recording.start),
                    end_time: source.encode_instant(&recording.end),
                    source: source.as_str().to_string(),
                };
                self.platform.playback_address(&request).await?
            }
        };

        if address.url.trim().is_empty() {
            return Err(SessionError::Resolution {
                code: None,
                reason: "platform returned an empty stream address".to_string(),
            });
        }

        tracing::debug!(
            camera = %target.camera_id,
            channel = target.channel,
            mode = ?target.mode,
            "Stream address resolved"
        );
        Ok(address.url)
    }
}
