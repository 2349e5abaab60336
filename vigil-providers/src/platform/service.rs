//! Video Platform service interface
//!
//! The seam the core services depend on. `PlatformClient` is the HTTP
//! implementation; tests substitute in-process fakes.

use async_trait::async_trait;

use super::types::{
    AddressData, CloudRecordData, CloudRecordRequest, LiveAddressRequest, LocalRecordData,
    LocalRecordRequest, PlaybackAddressRequest, TokenData,
};
use super::{PlatformClient, PlatformError};

/// Unified video platform interface
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Where requests go, for logging
    fn endpoint(&self) -> &str;

    async fn access_token(&self, app_key: &str, app_secret: &str) -> Result<TokenData, PlatformError>;

    async fn live_address(&self, request: &LiveAddressRequest) -> Result<AddressData, PlatformError>;

    async fn playback_address(
        &self,
        request: &PlaybackAddressRequest,
    ) -> Result<AddressData, PlatformError>;

    async fn local_records(&self, request: &LocalRecordRequest) -> Result<LocalRecordData, PlatformError>;

    async fn cloud_records(
        &self,
        request: &CloudRecordRequest,
    ) -> Result<Option<CloudRecordData>, PlatformError>;
}

#[async_trait]
impl VideoPlatform for PlatformClient {
    fn endpoint(&self) -> &str {
        self.base_url()
    }

    async fn access_token(&self, app_key: &str, app_secret: &str) -> Result<TokenData, PlatformError> {
        PlatformClient::access_token(self, app_key, app_secret).await
    }

    async fn live_address(&self, request: &LiveAddressRequest) -> Result<AddressData, PlatformError> {
        PlatformClient::live_address(self, request).await
    }

    async fn playback_address(
        &self,
        request: &PlaybackAddressRequest,
    ) -> Result<AddressData, PlatformError> {
        PlatformClient::playback_address(self, request).await
    }

    async fn local_records(&self, request: &LocalRecordRequest) -> Result<LocalRecordData, PlatformError> {
        PlatformClient::local_records(self, request).await
    }

    async fn cloud_records(
        &self,
        request: &CloudRecordRequest,
    ) -> Result<Option<CloudRecordData>, PlatformError> {
        PlatformClient::cloud_records(self, request).await
    }
}
