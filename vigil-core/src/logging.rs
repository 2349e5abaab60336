use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Initialize structured logging based on configuration
///
/// JSON for machine consumption, pretty for terminals. `RUST_LOG` overrides
/// the configured level when set.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let log_level = parse_log_level(&config.level)?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    let registry = tracing_subscriber::registry().with(env_filter);

    match parse_format(&config.format)? {
        LogFormat::Json => {
            let json_layer = fmt::layer()
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .with_current_span(true)
                .with_target(true)
                .with_line_number(true);

            if let Some(file_path) = &config.file_path {
                let file = open_log_file(file_path)?;
                registry.with(json_layer.with_writer(std::sync::Arc::new(file))).try_init()?;
            } else {
                registry.with(json_layer.with_writer(std::io::stderr)).try_init()?;
            }
        }
        LogFormat::Pretty => {
            let pretty_layer = fmt::layer()
                .pretty()
                .with_target(true)
                .with_line_number(true)
                .with_file(false);

            if let Some(file_path) = &config.file_path {
                let file = open_log_file(file_path)?;
                let file_layer = pretty_layer.with_ansi(false).with_writer(std::sync::Arc::new(file));
                registry.with(file_layer).try_init()?;
            } else {
                // stdout carries command output
                registry.with(pretty_layer.with_writer(std::io::stderr)).try_init()?;
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Json,
    Pretty,
}

fn parse_format(format: &str) -> anyhow::Result<LogFormat> {
    match format.to_lowercase().as_str() {
        "json" => Ok(LogFormat::Json),
        "pretty" | "text" => Ok(LogFormat::Pretty),
        _ => Err(anyhow::anyhow!("Invalid log format: {format}")),
    }
}

fn open_log_file(path: &str) -> std::io::Result<std::fs::File> {
    std::fs::OpenOptions::new().create(true).append(true).open(path)
}

/// Parse log level string to tracing Level
fn parse_log_level(level: &str) -> anyhow::Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(anyhow::anyhow!("Invalid log level: {level}")),
    }
}
