//! Test helpers and fixtures for vigil-core unit tests

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use vigil_providers::platform::{
    AddressData, CloudRecordData, CloudRecordRequest, LiveAddressRequest, LocalRecordData,
    LocalRecordRequest, PlaybackAddressRequest, TokenData,
};
use vigil_providers::{PlatformError, VideoPlatform};

use crate::models::{RecordingItem, RecordingSource};
use crate::session::{Player, PlayerConfig, PlayerError};

/// One-hour recording on 2024-01-01 starting at `start_hour` UTC
pub fn recording(source: RecordingSource, start_hour: u32) -> RecordingItem {
    RecordingItem {
        start: Utc.with_ymd_and_hms(2024, 1, 1, start_hour, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2024, 1, 1, start_hour + 1, 0, 0).unwrap(),
        size_bytes: 0,
        duration_seconds: 3600,
        source,
        kind: None,
        continuation_key: None,
    }
}

/// In-process platform that answers address requests immediately
#[derive(Default)]
pub struct StaticPlatform {
    pub address_error: Mutex<Option<PlatformError>>,
    pub live_calls: AtomicUsize,
    pub playback_calls: AtomicUsize,
    pub last_playback: Mutex<Option<PlaybackAddressRequest>>,
}

impl StaticPlatform {
    pub fn failing(err: PlatformError) -> Self {
        Self {
            address_error: Mutex::new(Some(err)),
            ..Self::default()
        }
    }

    fn address(&self, url: String) -> Result<AddressData, PlatformError> {
        match self.address_error.lock().clone() {
            Some(err) => Err(err),
            None => Ok(AddressData { id: None, url }),
        }
    }
}

#[async_trait]
impl VideoPlatform for StaticPlatform {
    fn endpoint(&self) -> &str {
        "static"
    }

    async fn access_token(&self, _app_key: &str, _app_secret: &str) -> Result<TokenData, PlatformError> {
        Ok(TokenData {
            access_token: "at.static".to_string(),
            expire_time: None,
        })
    }

    async fn live_address(&self, request: &LiveAddressRequest) -> Result<AddressData, PlatformError> {
        self.live_calls.fetch_add(1, Ordering::SeqCst);
        self.address(format!(
            "https://stream.test/live/{}/{}.m3u8",
            request.device_serial, request.channel_no
        ))
    }

    async fn playback_address(
        &self,
        request: &PlaybackAddressRequest,
    ) -> Result<AddressData, PlatformError> {
        self.playback_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_playback.lock() = Some(request.clone());
        self.address(format!(
            "https://stream.test/rec/{}/{}?start={}",
            request.device_serial, request.channel_no, request.start_time
        ))
    }

    async fn local_records(&self, _request: &LocalRecordRequest) -> Result<LocalRecordData, PlatformError> {
        Ok(LocalRecordData::default())
    }

    async fn cloud_records(
        &self,
        _request: &CloudRecordRequest,
    ) -> Result<Option<CloudRecordData>, PlatformError> {
        Ok(None)
    }
}

/// Player that tracks how many handles are alive at once
#[derive(Default)]
pub struct CountingPlayer {
    next_id: AtomicU64,
    pub live: AtomicUsize,
    pub max_live: AtomicUsize,
    pub created: Mutex<Vec<PlayerConfig>>,
    pub destroyed: Mutex<Vec<u64>>,
    pub fail_next: Mutex<Option<String>>,
}

impl Player for CountingPlayer {
    type Handle = u64;

    fn create(&self, config: &PlayerConfig) -> Result<u64, PlayerError> {
        if let Some(reason) = self.fail_next.lock().take() {
            return Err(PlayerError::new(reason));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_live.fetch_max(live, Ordering::SeqCst);
        self.created.lock().push(config.clone());
        Ok(id)
    }

    fn destroy(&self, handle: u64) {
        self.live.fetch_sub(1, Ordering::SeqCst);
        self.destroyed.lock().push(handle);
    }
}
