//! Video Platform HTTP Client
//!
//! Pure HTTP client for the vendor open API, no dependency on sessions or catalogs

use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::PlatformError;
use super::types::{
    AddressData, ApiResp, CloudRecordData, CloudRecordRequest, LiveAddressRequest,
    LocalRecordData, LocalRecordQuery, LocalRecordRequest, LocalRecordResp,
    PlaybackAddressRequest, TokenData, TokenReq,
};

const TOKEN_PATH: &str = "/api/lapp/token/get";
const LIVE_ADDRESS_PATH: &str = "/api/lapp/v2/live/address/get";
const PLAYBACK_ADDRESS_PATH: &str = "/api/lapp/v2/playback/address/get";
const LOCAL_RECORDS_PATH: &str = "/api/v3/device/local/video/unify/query";
const CLOUD_RECORDS_PATH: &str = "/api/lapp/video/by/time";

const ACCESS_TOKEN_HEADER: &str = "accesstoken";
const DEVICE_SERIAL_HEADER: &str = "deviceserial";
const LOCAL_INDEX_HEADER: &str = "localindex";

/// Default transport timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Video Platform HTTP Client
///
/// Provides methods for interacting with the vendor API:
/// - Authentication (access token)
/// - Stream addresses (live, playback)
/// - Recording search (device-local, cloud)
#[derive(Debug, Clone)]
pub struct PlatformClient {
    base_url: String,
    client: Client,
}

impl PlatformClient {
    /// Create a new client with the default transport timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self, PlatformError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a new client with an explicit transport timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PlatformError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(PlatformError::InvalidConfig("base URL is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlatformError::Network(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// Get base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a form and unwrap the `{code, msg, data}` envelope
    async fn post_form<F, T>(&self, path: &str, form: &F) -> Result<Option<T>, PlatformError>
    where
        F: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(url = %url, "platform request");

        let response = self.client.post(&url).form(form).send().await?;
        let (status, resp): (_, ApiResp<T>) = decode_body(response).await?;

        if !resp.code.is_success() {
            return Err(PlatformError::Api {
                code: resp.code.0,
                message: resp.msg,
            });
        }
        check_status(status)?;

        Ok(resp.data)
    }

    /// Exchange an app key / app secret pair for an access token
    pub async fn access_token(&self, app_key: &str, app_secret: &str) -> Result<TokenData, PlatformError> {
        let form = TokenReq { app_key, app_secret };
        self.post_form::<_, TokenData>(TOKEN_PATH, &form)
            .await?
            .ok_or_else(|| PlatformError::Parse("Missing token data".to_string()))
    }

    /// Get a live stream address
    pub async fn live_address(&self, request: &LiveAddressRequest) -> Result<AddressData, PlatformError> {
        self.post_form::<_, AddressData>(LIVE_ADDRESS_PATH, request)
            .await?
            .ok_or_else(|| PlatformError::Parse("Missing live address data".to_string()))
    }

    /// Get a playback stream address for a recorded span
    pub async fn playback_address(
        &self,
        request: &PlaybackAddressRequest,
    ) -> Result<AddressData, PlatformError> {
        self.post_form::<_, AddressData>(PLAYBACK_ADDRESS_PATH, request)
            .await?
            .ok_or_else(|| PlatformError::Parse("Missing playback address data".to_string()))
    }

    /// Search device-local recordings
    ///
    /// Credential, device and channel travel as headers; times are epoch
    /// seconds in the query string.
    pub async fn local_records(&self, request: &LocalRecordRequest) -> Result<LocalRecordData, PlatformError> {
        let url = self.url(LOCAL_RECORDS_PATH);

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(ACCESS_TOKEN_HEADER),
            HeaderValue::from_str(&request.access_token)?,
        );
        headers.insert(
            HeaderName::from_static(DEVICE_SERIAL_HEADER),
            HeaderValue::from_str(&request.device_serial)?,
        );
        headers.insert(
            HeaderName::from_static(LOCAL_INDEX_HEADER),
            HeaderValue::from(request.local_index),
        );

        let query = LocalRecordQuery {
            start_time: request.start_time,
            end_time: request.end_time,
            page_size: request.page_size,
            record_type: request.record_type.as_deref(),
        };

        debug!(url = %url, device = %request.device_serial, "platform request");

        let response = self
            .client
            .get(&url)
            .headers(headers)
            .query(&query)
            .send()
            .await?;
        let (status, resp): (_, LocalRecordResp) = decode_body(response).await?;

        if !resp.meta.code.is_success() {
            return Err(PlatformError::Api {
                code: resp.meta.code.0,
                message: resp.meta.message,
            });
        }
        check_status(status)?;

        Ok(resp.data.unwrap_or_default())
    }

    /// Search cloud recordings
    ///
    /// Everything, credential included, travels in the form body; times are
    /// epoch milliseconds. `None` means the platform returned no data at all.
    pub async fn cloud_records(
        &self,
        request: &CloudRecordRequest,
    ) -> Result<Option<CloudRecordData>, PlatformError> {
        self.post_form::<_, CloudRecordData>(CLOUD_RECORDS_PATH, request).await
    }
}

/// Decode a vendor reply whatever its HTTP status.
///
/// Error statuses often still carry a vendor code; only when the body does
/// not decode does the status itself become the error.
async fn decode_body<R: DeserializeOwned>(response: Response) -> Result<(StatusCode, R), PlatformError> {
    let status = response.status();
    let body = response.bytes().await?;

    match serde_json::from_slice(&body) {
        Ok(decoded) => Ok((status, decoded)),
        Err(_) if !status.is_success() => Err(status_error(status)),
        Err(e) => Err(e.into()),
    }
}

fn check_status(status: StatusCode) -> Result<(), PlatformError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(status_error(status))
    }
}

fn status_error(status: StatusCode) -> PlatformError {
    PlatformError::Network(format!("HTTP status {status}"))
}
