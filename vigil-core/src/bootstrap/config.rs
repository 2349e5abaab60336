//! Configuration loading

use std::path::Path;

use anyhow::{Context, Result};

use crate::Config;

/// Default config file, relative to the working directory
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Load configuration from config file or environment variables
///
/// Config file search order:
/// 1. `explicit` (e.g. a `--config` flag); must exist
/// 2. `VIGIL_CONFIG_PATH` environment variable
/// 3. ./config.yaml (current working directory)
/// 4. Fall back to environment variables only
///
/// Runs before logging is initialized, so diagnostics go to stderr directly.
pub fn load_config(explicit: Option<&str>) -> Result<Config> {
    let config = if let Some(path) = explicit {
        if !Path::new(path).exists() {
            anyhow::bail!("Config file {path} does not exist");
        }
        Config::from_file(path).with_context(|| format!("Failed to load {path}"))?
    } else {
        let found = std::env::var("VIGIL_CONFIG_PATH")
            .ok()
            .filter(|p| Path::new(p).exists())
            .or_else(|| {
                Path::new(DEFAULT_CONFIG_FILE)
                    .exists()
                    .then(|| DEFAULT_CONFIG_FILE.to_string())
            });

        match found {
            Some(path) => {
                eprintln!("Loading config from {path}");
                Config::from_file(&path).unwrap_or_else(|e| {
                    eprintln!("Failed to load {path}: {e}");
                    eprintln!("Falling back to environment variables");
                    Config::from_env().unwrap_or_default()
                })
            }
            None => Config::from_env().unwrap_or_else(|e| {
                eprintln!("Failed to load config: {e}");
                eprintln!("Using default configuration");
                Config::default()
            }),
        }
    };

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Config validation error: {error}");
        }
        return Err(anyhow::anyhow!(
            "Configuration validation failed with {} error(s): {}",
            errors.len(),
            errors.join("; ")
        ));
    }

    Ok(config)
}
