use chrono::{DateTime, FixedOffset};
use clap::{Args, Parser, Subcommand};
use vigil_core::models::{RecordKind, RecordingSource};

#[derive(Parser, Debug)]
#[command(name = "vigil")]
#[command(about = "Camera recording search and stream session tool", long_about = None)]
pub struct Cli {
    /// Config file (defaults to VIGIL_CONFIG_PATH, then ./config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Acquire a platform credential
    Token(TokenArgs),
    /// Search recordings for a camera channel
    Records(RecordsArgs),
    /// Resolve a live or playback stream and open a session for it
    StreamUrl(StreamArgs),
}

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Overrides the configured app key
    #[arg(long, env = "VIGIL_APP_KEY")]
    pub app_key: Option<String>,

    /// Overrides the configured app secret
    #[arg(long, env = "VIGIL_APP_SECRET", hide_env_values = true)]
    pub app_secret: Option<String>,

    /// Print the full token instead of a masked summary
    #[arg(long)]
    pub reveal: bool,
}

#[derive(Args, Debug)]
pub struct RecordsArgs {
    /// Device serial
    #[arg(long)]
    pub device: String,

    /// Channel number (defaults to the configured channel)
    #[arg(long)]
    pub channel: Option<u32>,

    /// `local` or `cloud`
    #[arg(long, default_value = "local")]
    pub source: RecordingSource,

    /// Window start, RFC 3339
    #[arg(long, value_parser = parse_instant)]
    pub start: DateTime<FixedOffset>,

    /// Window end, RFC 3339
    #[arg(long, value_parser = parse_instant)]
    pub end: DateTime<FixedOffset>,

    /// `all`, `scheduled` or `event` (local only)
    #[arg(long)]
    pub kind: Option<RecordKind>,

    #[arg(long)]
    pub page_size: Option<u32>,

    /// Follow continuation up to the configured page limit
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Device serial
    #[arg(long)]
    pub device: String,

    #[arg(long)]
    pub channel: Option<u32>,

    /// Recording source for playback
    #[arg(long, default_value = "local")]
    pub source: RecordingSource,

    /// Playback start, RFC 3339; omit for live
    #[arg(long, value_parser = parse_instant, requires = "playback_end")]
    pub playback_start: Option<DateTime<FixedOffset>>,

    /// Playback end, RFC 3339
    #[arg(long, value_parser = parse_instant, requires = "playback_start")]
    pub playback_end: Option<DateTime<FixedOffset>>,

    /// Viewer width in pixels, selects the compact or standard template
    #[arg(long, default_value_t = 1920)]
    pub viewport_width: u32,
}

fn parse_instant(s: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s).map_err(|e| format!("expected RFC 3339 time: {e}"))
}
