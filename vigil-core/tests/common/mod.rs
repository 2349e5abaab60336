//! Shared fixtures for vigil-core integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::sync::Notify;
use vigil_core::models::{Credential, RecordingQuery, RecordingSource};
use vigil_core::{Player, PlayerConfig, PlayerError};
use vigil_providers::platform::{
    AddressData, CloudRecordData, CloudRecordRequest, LiveAddressRequest, LocalRecordData,
    LocalRecordRequest, PlaybackAddressRequest, TokenData,
};
use vigil_providers::{PlatformClient, PlatformError, VideoPlatform};
use wiremock::MockServer;

pub const TOKEN_PATH: &str = "/api/lapp/token/get";
pub const LIVE_ADDRESS_PATH: &str = "/api/lapp/v2/live/address/get";
pub const PLAYBACK_ADDRESS_PATH: &str = "/api/lapp/v2/playback/address/get";
pub const LOCAL_RECORDS_PATH: &str = "/api/v3/device/local/video/unify/query";
pub const CLOUD_RECORDS_PATH: &str = "/api/lapp/video/by/time";

/// Address nothing listens on
pub const UNREACHABLE: &str = "http://127.0.0.1:9";

pub fn client(server: &MockServer) -> Arc<dyn VideoPlatform> {
    Arc::new(PlatformClient::new(server.uri()).unwrap())
}

pub fn unreachable_client() -> Arc<dyn VideoPlatform> {
    Arc::new(PlatformClient::new(UNREACHABLE).unwrap())
}

pub fn credential() -> Credential {
    Credential::new("at.integration")
}

/// `{code, msg, data}` success envelope
pub fn ok_envelope(data: Value) -> Value {
    json!({ "code": "200", "msg": "Operation succeeded!", "data": data })
}

pub fn error_envelope(code: &str) -> Value {
    json!({ "code": code, "msg": "vendor message" })
}

pub fn utc8() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap()
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
}

pub fn local_query(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> RecordingQuery {
    RecordingQuery::new("D1", 1, RecordingSource::Local, start, end)
}

pub fn cloud_query(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> RecordingQuery {
    RecordingQuery::new("D1", 1, RecordingSource::Cloud, start, end)
}

/// In-process platform whose address calls can be held open per camera.
///
/// A gated camera's address request blocks until [`GatedPlatform::release`]
/// is called for it.
#[derive(Default)]
pub struct GatedPlatform {
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    /// Signalled each time a gated request starts waiting
    pub entered: Notify,
    pub address_calls: AtomicUsize,
}

impl GatedPlatform {
    pub fn gate(&self, camera_id: &str) {
        self.gates
            .lock()
            .insert(camera_id.to_string(), Arc::new(Notify::new()));
    }

    pub fn release(&self, camera_id: &str) {
        if let Some(gate) = self.gates.lock().get(camera_id) {
            gate.notify_one();
        }
    }

    async fn address(&self, camera_id: &str, url: String) -> Result<AddressData, PlatformError> {
        self.address_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().get(camera_id).cloned();
        if let Some(gate) = gate {
            self.entered.notify_one();
            gate.notified().await;
        }
        Ok(AddressData { id: None, url })
    }
}

#[async_trait]
impl VideoPlatform for GatedPlatform {
    fn endpoint(&self) -> &str {
        "gated"
    }

    async fn access_token(&self, _app_key: &str, _app_secret: &str) -> Result<TokenData, PlatformError> {
        Ok(TokenData {
            access_token: "at.gated".to_string(),
            expire_time: None,
        })
    }

    async fn live_address(&self, request: &LiveAddressRequest) -> Result<AddressData, PlatformError> {
        let url = format!("https://stream.test/live/{}/{}", request.device_serial, request.channel_no);
        self.address(&request.device_serial, url).await
    }

    async fn playback_address(
        &self,
        request: &PlaybackAddressRequest,
    ) -> Result<AddressData, PlatformError> {
        let url = format!(
            "https://stream.test/{}/{}/{}-{}",
            request.source, request.device_serial, request.start_time, request.end_time
        );
        self.address(&request.device_serial, url).await
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    Created { handle: u64, url: String, template: String },
    Destroyed { handle: u64 },
}

/// Player that records every create/destroy in order
#[derive(Default)]
pub struct RecordingPlayer {
    next_handle: AtomicU64,
    live: AtomicUsize,
    max_live: AtomicUsize,
    events: Mutex<Vec<PlayerEvent>>,
}

impl RecordingPlayer {
    pub fn events(&self) -> Vec<PlayerEvent> {
        self.events.lock().clone()
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn max_live(&self) -> usize {
        self.max_live.load(Ordering::SeqCst)
    }

    pub fn created_urls(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                PlayerEvent::Created { url, .. } => Some(url.clone()),
                PlayerEvent::Destroyed { .. } => None,
            })
            .collect()
    }
}

impl Player for RecordingPlayer {
    type Handle = u64;

    fn create(&self, config: &PlayerConfig) -> Result<u64, PlayerError> {
        let handle = self.next_handle.fetch_add(1, Ordering::SeqCst) + 1;
        let live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_live.fetch_max(live, Ordering::SeqCst);
        self.events.lock().push(PlayerEvent::Created {
            handle,
            url: config.stream_url.clone(),
            template: config.template.clone(),
        });
        Ok(handle)
    }

    fn destroy(&self, handle: u64) {
        self.live.fetch_sub(1, Ordering::SeqCst);
        self.events.lock().push(PlayerEvent::Destroyed { handle });
    }
}
