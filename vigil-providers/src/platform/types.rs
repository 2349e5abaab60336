//! Wire types of the vendor video API

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Vendor status code.
///
/// Most endpoints send it as a string (`"200"`), the device-local search
/// sends a number (`200`). Both decode to the same string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorCode(pub String);

impl VendorCode {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        super::codes::is_success(&self.0)
    }
}

impl<'de> Deserialize<'de> for VendorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self(s)),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(de::Error::custom(format!("unexpected status code: {other}"))),
        }
    }
}

/// Common response envelope: `{code, msg, data}`
#[derive(Debug, Deserialize)]
pub struct ApiResp<T> {
    pub code: VendorCode,
    #[serde(default, alias = "message")]
    pub msg: String,
    pub data: Option<T>,
}

// ========== Token ==========

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenReq<'a> {
    pub app_key: &'a str,
    pub app_secret: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
    pub access_token: String,
    /// Expiry as epoch milliseconds (informational only)
    #[serde(default)]
    pub expire_time: Option<i64>,
}

// ========== Stream addresses ==========

/// Live stream address request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveAddressRequest {
    pub access_token: String,
    pub device_serial: String,
    pub channel_no: u32,
    /// Stream protocol (1 ezopen, 2 hls, 3 rtmp, 4 flv)
    pub protocol: u8,
    /// 1 high definition, 2 smooth
    pub quality: u8,
    /// Always 1 (live) for this endpoint
    #[serde(rename = "type")]
    pub kind: u8,
}

/// Playback stream address request
///
/// `start_time`/`end_time` follow the convention of `source`: epoch seconds
/// for `local`, epoch milliseconds for `cloud`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackAddressRequest {
    pub access_token: String,
    pub device_serial: String,
    pub channel_no: u32,
    pub start_time: i64,
    pub end_time: i64,
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressData {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
}

// ========== Device-local recordings ==========

/// Device-local recording search.
///
/// `access_token`, `device_serial` and `local_index` are sent as request
/// headers; the rest as query parameters.
#[derive(Debug, Clone)]
pub struct LocalRecordRequest {
    pub access_token: String,
    pub device_serial: String,
    pub local_index: u32,
    /// Epoch seconds
    pub start_time: i64,
    /// Epoch seconds
    pub end_time: i64,
    pub page_size: u32,
    pub record_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LocalRecordQuery<'a> {
    pub start_time: i64,
    pub end_time: i64,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct LocalMeta {
    pub code: VendorCode,
    #[serde(default)]
    pub message: String,
}

/// `{meta:{code}, data:{records, hasMore, nextFileTime}}`
#[derive(Debug, Deserialize)]
pub struct LocalRecordResp {
    pub meta: LocalMeta,
    pub data: Option<LocalRecordData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalRecordData {
    #[serde(default)]
    pub records: Vec<LocalRecord>,
    #[serde(default)]
    pub has_more: bool,
    /// Epoch seconds of the first record not yet returned
    #[serde(default)]
    pub next_file_time: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalRecord {
    /// Epoch seconds
    pub start_time: i64,
    /// Epoch seconds
    pub end_time: i64,
    /// e.g. `TIMING`, `ALARM`
    #[serde(default)]
    pub record_type: Option<String>,
    #[serde(default, alias = "size")]
    pub file_size: Option<u64>,
}

// ========== Cloud recordings ==========

/// Cloud recording search, sent entirely as a form body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudRecordRequest {
    pub access_token: String,
    pub device_serial: String,
    pub channel_no: u32,
    /// Epoch milliseconds
    pub start_time: i64,
    /// Epoch milliseconds
    pub end_time: i64,
    /// Storage selector, 1 = cloud
    pub rec_type: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudFile {
    /// Epoch milliseconds
    pub start_time: i64,
    /// Epoch milliseconds
    pub end_time: i64,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub file_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudEnvelope {
    pub files: Vec<CloudFile>,
    #[serde(default = "default_is_all")]
    pub is_all: bool,
    /// Epoch milliseconds of the first file not yet returned
    #[serde(default)]
    pub next_file_time: Option<i64>,
}

const fn default_is_all() -> bool {
    true
}

/// Cloud search payload: either a flat file list or a paged envelope.
///
/// Decoded by discriminator: a JSON array is `Flat`, an object carrying a
/// `files` key is `Paged`. Anything else is rejected.
#[derive(Debug, Clone)]
pub enum CloudRecordData {
    Flat(Vec<CloudFile>),
    Paged(CloudEnvelope),
}

impl<'de> Deserialize<'de> for CloudRecordData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if value.is_array() {
            serde_json::from_value(value)
                .map(Self::Flat)
                .map_err(de::Error::custom)
        } else if value.get("files").is_some() {
            serde_json::from_value(value)
                .map(Self::Paged)
                .map_err(de::Error::custom)
        } else {
            Err(de::Error::custom(
                "cloud recording data is neither a file list nor a paged envelope",
            ))
        }
    }
}
