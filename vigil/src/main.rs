mod cli;

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use vigil_core::{
    bootstrap::{init_services, load_config, Services},
    logging,
    models::{RecordingItem, RecordingQuery, SessionTarget, ViewerClass},
    Player, PlayerConfig, PlayerError, SessionOutcome,
};

use cli::{Cli, Command, RecordsArgs, StreamArgs, TokenArgs};

/// Surface name used for terminal sessions
const CLI_SURFACE: &str = "cli";

/// Headless player: announces the stream and holds nothing
struct AnnouncePlayer;

impl Player for AnnouncePlayer {
    type Handle = String;

    fn create(&self, config: &PlayerConfig) -> Result<String, PlayerError> {
        info!(surface = %config.surface_id, template = %config.template, "Stream ready");
        Ok(config.surface_id.clone())
    }

    fn destroy(&self, handle: String) {
        debug!(surface = %handle, "Stream released");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load configuration
    let config = load_config(cli.config.as_deref())?;

    // 2. Initialize logging
    logging::init_logging(&config.logging)?;
    info!(
        base_url = %config.platform.base_url,
        proxy = config.platform.proxy_base_url.is_some(),
        "Configuration loaded"
    );

    // 3. Wire services
    let services = init_services(&config)?;

    match cli.command {
        Command::Token(args) => token(&services, args).await,
        Command::Records(args) => records(&services, args).await,
        Command::StreamUrl(args) => stream_url(&services, args).await,
    }
}

async fn token(services: &Services, args: TokenArgs) -> Result<()> {
    let credential = match (args.app_key, args.app_secret) {
        (Some(key), Some(secret)) => services.credentials.acquire(&key, &secret).await?,
        (None, None) => services.credentials.acquire_configured().await?,
        _ => bail!("--app-key and --app-secret must be given together"),
    };

    if args.reveal {
        print_json(&credential)
    } else {
        print_json(&json!({
            "token": credential.masked_token(),
            "acquired_at": credential.acquired_at(),
        }))
    }
}

async fn records(services: &Services, args: RecordsArgs) -> Result<()> {
    let channel = args.channel.unwrap_or(services.defaults.channel);
    let mut req = RecordingQuery::new(args.device, channel, args.source, args.start, args.end);
    if let Some(kind) = args.kind {
        req = req.with_record_kind(kind);
    }
    if let Some(page_size) = args.page_size {
        req = req.with_page_size(page_size);
    }

    let credential = services.credentials.acquire_configured().await?;
    let page = if args.all {
        services
            .recordings
            .query_all(&credential, &req, services.defaults.max_pages)
            .await?
    } else {
        services.recordings.query(&credential, &req).await?
    };

    info!(items = page.items.len(), has_more = page.has_more, "Recordings found");
    print_json(&page)
}

async fn stream_url(services: &Services, args: StreamArgs) -> Result<()> {
    let channel = args.channel.unwrap_or(services.defaults.channel);
    let viewer_class = ViewerClass::for_viewport(args.viewport_width, services.defaults.viewport_breakpoint);

    let target = match (args.playback_start, args.playback_end) {
        (Some(start), Some(end)) => {
            if start >= end {
                bail!("--playback-start must be before --playback-end");
            }
            let recording = RecordingItem {
                start: start.with_timezone(&Utc),
                end: end.with_timezone(&Utc),
                size_bytes: 0,
                duration_seconds: u64::try_from((end - start).num_seconds()).unwrap_or(0),
                source: args.source,
                kind: None,
                continuation_key: None,
            };
            SessionTarget::playback(args.device, channel, viewer_class, recording)
        }
        _ => SessionTarget::live(args.device, channel, viewer_class),
    };

    let credential = services.credentials.acquire_configured().await?;
    let manager = services.session_manager(CLI_SURFACE, AnnouncePlayer);

    match manager.apply(Some(&credential), Some(&target)).await? {
        SessionOutcome::Started(summary) | SessionOutcome::Unchanged(summary) => print_json(&summary),
        other => bail!("session did not start: {other:?}"),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
