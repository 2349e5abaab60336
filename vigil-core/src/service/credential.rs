//! Credential acquisition
//!
//! Exchanges an app key / app secret pair for a platform credential. The
//! direct endpoint is tried first; on any failure the same pair is sent once
//! through the proxied route.

use std::sync::Arc;

use vigil_providers::VideoPlatform;

use crate::error::CredentialError;
use crate::models::Credential;

/// Credential manager
#[derive(Clone)]
pub struct CredentialManager {
    direct: Arc<dyn VideoPlatform>,
    fallback: Option<Arc<dyn VideoPlatform>>,
    app_key: String,
    app_secret: String,
}

impl std::fmt::Debug for CredentialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialManager")
            .field("direct", &self.direct.endpoint())
            .field("fallback", &self.fallback.as_ref().map(|p| p.endpoint()))
            .field("app_key", &self.app_key)
            .finish_non_exhaustive()
    }
}

impl CredentialManager {
    #[must_use]
    pub fn new(
        direct: Arc<dyn VideoPlatform>,
        app_key: impl Into<String>,
        app_secret: impl Into<String>,
    ) -> Self {
        Self {
            direct,
            fallback: None,
            app_key: app_key.into(),
            app_secret: app_secret.into(),
        }
    }

    /// Route tried when the direct endpoint fails
    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<dyn VideoPlatform>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Acquire a credential with the configured key pair
    pub async fn acquire_configured(&self) -> Result<Credential, CredentialError> {
        self.acquire(&self.app_key, &self.app_secret).await
    }

    /// Acquire a fresh credential.
    ///
    /// Every call hits the platform; nothing is cached, so two calls yield
    /// two independent credentials.
    pub async fn acquire(&self, app_key: &str, app_secret: &str) -> Result<Credential, CredentialError> {
        if app_key.trim().is_empty() || app_secret.trim().is_empty() {
            return Err(CredentialError::InvalidKeys(
                "app key and app secret must not be empty".to_string(),
            ));
        }

        let direct_err = match self.direct.access_token(app_key, app_secret).await {
            Ok(data) => {
                tracing::debug!(endpoint = %self.direct.endpoint(), "Credential acquired");
                return Ok(Credential::new(data.access_token));
            }
            Err(e) => CredentialError::from(e),
        };

        let Some(fallback) = &self.fallback else {
            tracing::warn!(error = %direct_err, "Credential acquisition failed");
            return Err(direct_err);
        };

        tracing::warn!(
            error = %direct_err,
            fallback = %fallback.endpoint(),
            "Direct credential request failed, trying proxied route"
        );

        match fallback.access_token(app_key, app_secret).await {
            Ok(data) => {
                tracing::info!(endpoint = %fallback.endpoint(), "Credential acquired via proxied route");
                Ok(Credential::new(data.access_token))
            }
            Err(e) => {
                let err = merge_failures(direct_err, CredentialError::from(e));
                tracing::warn!(error = %err, "Credential acquisition failed on both routes");
                Err(err)
            }
        }
    }
}

/// Pick the error to surface when both routes fail.
///
/// A platform verdict says more than a transport failure; between two
/// verdicts the later (proxied) one wins.
fn merge_failures(direct: CredentialError, fallback: CredentialError) -> CredentialError {
    if fallback.is_upstream_verdict() || !direct.is_upstream_verdict() {
        fallback
    } else {
        direct
    }
}
