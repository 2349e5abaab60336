use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a recording lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingSource {
    /// Vendor cloud storage; wide query window, millisecond timestamps
    Cloud,
    /// Device-local storage; single-day window, second timestamps
    Local,
}

impl RecordingSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cloud => "cloud",
            Self::Local => "local",
        }
    }

    /// Encode an instant in this source's wire unit
    #[must_use]
    pub fn encode_instant<Tz: chrono::TimeZone>(self, instant: &DateTime<Tz>) -> i64 {
        match self {
            Self::Cloud => instant.timestamp_millis(),
            Self::Local => instant.timestamp(),
        }
    }

    /// Decode a wire timestamp in this source's unit
    #[must_use]
    pub fn decode_instant(self, raw: i64) -> Option<DateTime<Utc>> {
        match self {
            Self::Cloud => DateTime::from_timestamp_millis(raw),
            Self::Local => DateTime::from_timestamp(raw, 0),
        }
    }
}

impl fmt::Display for RecordingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordingSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cloud" => Ok(Self::Cloud),
            "local" => Ok(Self::Local),
            other => Err(format!("unknown recording source: {other}")),
        }
    }
}

/// Recording category filter for device-local searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    All,
    /// Continuous / scheduled recording
    Scheduled,
    /// Motion or alarm triggered recording
    Event,
}

impl RecordKind {
    /// Vendor `recordType` value
    #[must_use]
    pub const fn as_local_param(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Scheduled => "TIMING",
            Self::Event => "ALARM",
        }
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "scheduled" | "timing" => Ok(Self::Scheduled),
            "event" | "alarm" => Ok(Self::Event),
            other => Err(format!("unknown record kind: {other}")),
        }
    }
}

/// Recording search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingQuery {
    pub device_id: String,
    pub channel: u32,
    pub source: RecordingSource,
    /// Window start; its offset defines the calendar day for local searches
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub record_kind: Option<RecordKind>,
    pub page_size: Option<u32>,
}

impl RecordingQuery {
    pub fn new(
        device_id: impl Into<String>,
        channel: u32,
        source: RecordingSource,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            channel,
            source,
            start,
            end,
            record_kind: None,
            page_size: None,
        }
    }

    #[must_use]
    pub const fn with_record_kind(mut self, kind: RecordKind) -> Self {
        self.record_kind = Some(kind);
        self
    }

    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Follow-up query for the next page.
    ///
    /// The window is narrowed to start at the page's continuation boundary
    /// (inclusive). When the vendor gives no boundary, or one that does not
    /// move the window forward, the end of the latest returned item is used
    /// instead. Returns `None` when the page is complete or neither point
    /// advances the window.
    #[must_use]
    pub fn next_page(&self, page: &RecordingPage) -> Option<Self> {
        if !page.has_more {
            return None;
        }

        let advances = |at: &DateTime<FixedOffset>| *at > self.start && *at < self.end;
        let from_token = page
            .continuation_token
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(|raw| self.source.decode_instant(raw))
            .map(|at| at.with_timezone(self.start.offset()))
            .filter(advances);
        let next_start = from_token.or_else(|| {
            page.last_end()
                .map(|at| at.with_timezone(self.start.offset()))
                .filter(advances)
        })?;

        Some(Self {
            start: next_start,
            ..self.clone()
        })
    }
}

/// Normalized recording catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingItem {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub size_bytes: u64,
    pub duration_seconds: u64,
    pub source: RecordingSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_key: Option<String>,
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingPage {
    pub items: Vec<RecordingItem>,
    pub has_more: bool,
    /// Raw vendor boundary (`nextFileTime`) in the source's unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

impl RecordingPage {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// End of the latest item on this page
    #[must_use]
    pub fn last_end(&self) -> Option<DateTime<Utc>> {
        self.items.iter().map(|item| item.end).max()
    }
}
