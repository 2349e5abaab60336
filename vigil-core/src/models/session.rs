use serde::{Deserialize, Serialize};
use std::fmt;

use super::RecordingItem;

/// What the session shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackMode {
    Live,
    Playback,
}

/// Coarse viewport category, drives the layout template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerClass {
    Compact,
    Standard,
}

impl ViewerClass {
    /// Compact below `breakpoint` pixels, standard otherwise
    #[must_use]
    pub const fn for_viewport(width: u32, breakpoint: u32) -> Self {
        if width < breakpoint {
            Self::Compact
        } else {
            Self::Standard
        }
    }
}

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Resolving,
    Active,
    /// Tearing the current handle down before a new one is requested
    Replacing,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Resolving => "resolving",
            Self::Active => "active",
            Self::Replacing => "replacing",
        };
        f.write_str(s)
    }
}

/// Requested session identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTarget {
    pub camera_id: String,
    pub channel: u32,
    pub mode: PlaybackMode,
    pub viewer_class: ViewerClass,
    /// Recording to play back; required in `Playback` mode
    pub recording: Option<RecordingItem>,
}

impl SessionTarget {
    pub fn live(camera_id: impl Into<String>, channel: u32, viewer_class: ViewerClass) -> Self {
        Self {
            camera_id: camera_id.into(),
            channel,
            mode: PlaybackMode::Live,
            viewer_class,
            recording: None,
        }
    }

    pub fn playback(
        camera_id: impl Into<String>,
        channel: u32,
        viewer_class: ViewerClass,
        recording: RecordingItem,
    ) -> Self {
        Self {
            camera_id: camera_id.into(),
            channel,
            mode: PlaybackMode::Playback,
            viewer_class,
            recording: Some(recording),
        }
    }

    /// Whether both targets bind the same session.
    ///
    /// Camera, channel, mode and viewer class always count. In playback mode
    /// the chosen recording's span and source count as well.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        if self.camera_id != other.camera_id
            || self.channel != other.channel
            || self.mode != other.mode
            || self.viewer_class != other.viewer_class
        {
            return false;
        }

        match self.mode {
            PlaybackMode::Live => true,
            PlaybackMode::Playback => match (&self.recording, &other.recording) {
                (Some(a), Some(b)) => a.start == b.start && a.end == b.end && a.source == b.source,
                (None, None) => true,
                _ => false,
            },
        }
    }
}

/// Read-only view of the active session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub id: String,
    pub camera_id: String,
    pub channel: u32,
    pub mode: PlaybackMode,
    pub viewer_class: ViewerClass,
    pub stream_url: String,
    pub template: String,
}
