//! Service initialization and dependency injection

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use vigil_providers::{PlatformClient, VideoPlatform};

use crate::{
    config::{DefaultsConfig, TemplatesConfig},
    service::{CredentialManager, RecordingQueryEngine, StreamResolver},
    session::{Player, SessionManager},
    Config,
};

/// Container for all initialized services
#[derive(Debug, Clone)]
pub struct Services {
    /// Credential acquisition, direct route first
    pub credentials: Arc<CredentialManager>,
    /// Recording catalog search
    pub recordings: Arc<RecordingQueryEngine>,
    /// Live and playback stream addresses
    pub streams: StreamResolver,
    pub templates: TemplatesConfig,
    pub defaults: DefaultsConfig,
}

impl Services {
    /// Session manager bound to `surface_id`, sharing this container's resolver
    pub fn session_manager<P: Player>(&self, surface_id: impl Into<String>, player: P) -> SessionManager<P> {
        SessionManager::new(surface_id, self.streams.clone(), self.templates.clone(), player)
    }
}

/// Initialize all core services
pub fn init_services(config: &Config) -> Result<Services> {
    let timeout = Duration::from_secs(config.platform.request_timeout_seconds);

    let direct: Arc<dyn VideoPlatform> = Arc::new(
        PlatformClient::with_timeout(&config.platform.base_url, timeout)
            .context("Failed to create platform client")?,
    );

    let mut credentials = CredentialManager::new(
        direct.clone(),
        config.platform.app_key(),
        config.platform.app_secret(),
    );
    if let Some(proxy_url) = &config.platform.proxy_base_url {
        let proxy = PlatformClient::with_timeout(proxy_url, timeout)
            .context("Failed to create proxied platform client")?;
        credentials = credentials.with_fallback(Arc::new(proxy));
        info!(proxy = %proxy_url, "Proxied credential route enabled");
    }

    let recordings = RecordingQueryEngine::new(direct.clone())
        .with_default_page_size(config.defaults.page_size);

    let streams = StreamResolver::new(direct)
        .with_protocol(config.defaults.live_protocol)
        .with_quality(config.defaults.quality);

    Ok(Services {
        credentials: Arc::new(credentials),
        recordings: Arc::new(recordings),
        streams,
        templates: config.templates.clone(),
        defaults: config.defaults.clone(),
    })
}
