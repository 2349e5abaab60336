use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{PlaybackMode, ViewerClass};

/// App key used when none is configured
pub const DEFAULT_APP_KEY: &str = "vigil-default-app-key";
/// App secret used when none is configured
pub const DEFAULT_APP_SECRET: &str = "vigil-default-app-secret";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub platform: PlatformConfig,
    pub defaults: DefaultsConfig,
    pub templates: TemplatesConfig,
    pub logging: LoggingConfig,
}

/// Vendor platform access
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Direct vendor API base URL
    pub base_url: String,
    /// Proxied route to the same API, tried when the direct call fails
    pub proxy_base_url: Option<String>,
    pub app_key: Option<String>,
    pub app_secret: Option<String>,
    pub request_timeout_seconds: u64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: "https://open.ys7.com".to_string(),
            proxy_base_url: None,
            app_key: None,
            app_secret: None,
            request_timeout_seconds: 30,
        }
    }
}

impl PlatformConfig {
    /// Configured app key, or the built-in default
    #[must_use]
    pub fn app_key(&self) -> &str {
        self.app_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .unwrap_or(DEFAULT_APP_KEY)
    }

    /// Configured app secret, or the built-in default
    #[must_use]
    pub fn app_secret(&self) -> &str {
        self.app_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_APP_SECRET)
    }
}

/// Request defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub channel: u32,
    /// Live protocol: 1 ezopen, 2 hls, 3 rtmp, 4 flv
    pub live_protocol: u8,
    /// 1 high definition, 2 smooth
    pub quality: u8,
    pub page_size: u32,
    /// Upper bound on pages followed by a full catalog fetch
    pub max_pages: usize,
    /// Viewports narrower than this are compact
    pub viewport_breakpoint: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            channel: 1,
            live_protocol: 2,
            quality: 1,
            page_size: 100,
            max_pages: 20,
            viewport_breakpoint: 768,
        }
    }
}

/// Player layout template identifiers per viewer class and mode
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    pub compact_live: String,
    pub compact_playback: String,
    pub standard_live: String,
    pub standard_playback: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            compact_live: "mobileLive".to_string(),
            compact_playback: "mobileRec".to_string(),
            standard_live: "pcLive".to_string(),
            standard_playback: "pcRec".to_string(),
        }
    }
}

impl TemplatesConfig {
    #[must_use]
    pub fn select(&self, viewer_class: ViewerClass, mode: PlaybackMode) -> &str {
        match (viewer_class, mode) {
            (ViewerClass::Compact, PlaybackMode::Live) => &self.compact_live,
            (ViewerClass::Compact, PlaybackMode::Playback) => &self.compact_playback,
            (ViewerClass::Standard, PlaybackMode::Live) => &self.standard_live,
            (ViewerClass::Standard, PlaybackMode::Playback) => &self.standard_playback,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Defaults (lowest priority)
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::from(Path::new(path)));
            }
        }

        // VIGIL_PLATFORM__BASE_URL, VIGIL_DEFAULTS__PAGE_SIZE, ...
        builder = builder.add_source(
            Environment::with_prefix("VIGIL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// Check values that would otherwise only fail on first use
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Err(e) = url::Url::parse(&self.platform.base_url) {
            errors.push(format!("platform.base_url is not a valid URL: {e}"));
        }
        if let Some(proxy) = &self.platform.proxy_base_url {
            if let Err(e) = url::Url::parse(proxy) {
                errors.push(format!("platform.proxy_base_url is not a valid URL: {e}"));
            }
        }
        if self.platform.request_timeout_seconds == 0 {
            errors.push("platform.request_timeout_seconds must be positive".to_string());
        }
        if self.defaults.page_size == 0 || self.defaults.page_size > 500 {
            errors.push("defaults.page_size must be between 1 and 500".to_string());
        }
        if self.defaults.max_pages == 0 {
            errors.push("defaults.max_pages must be positive".to_string());
        }

        let templates = [
            ("compact_live", &self.templates.compact_live),
            ("compact_playback", &self.templates.compact_playback),
            ("standard_live", &self.templates.standard_live),
            ("standard_playback", &self.templates.standard_playback),
        ];
        for (name, value) in templates {
            if value.trim().is_empty() {
                errors.push(format!("templates.{name} must not be empty"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
