mod session;
mod timestamp;

use anyhow::Result;
use clap::Parser;
use session::Session;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vrtconfig::Config;
use vrtfeed::{Station, VrtFeedClient, VrtFeedConfigExt};
use vrtplayer::{PlayLog, PlaybackDriver, PlayerConfigExt};
use vrttube::{TubeClient, TubeConfigExt};

/// Follow a VRT radio station and play its songs from the video platform
#[derive(Debug, Parser)]
#[command(name = "vrtcast", version, about)]
struct Cli {
    /// Station to follow: stubru, radio1, mnm or mnmhits
    station: Option<String>,

    /// Replay past broadcasts from an interactively entered start time
    #[arg(short = 'p', long = "past")]
    past: bool,

    /// Configuration directory (default: .vrtcast in cwd or home)
    #[arg(long)]
    config_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ========== Phase 1: configuration and logging ==========

    let config: Arc<Config> = match &cli.config_dir {
        Some(dir) => Arc::new(Config::load_config(dir)?),
        None => vrtconfig::get_config(),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let level = config
                .get_log_min_level()
                .unwrap_or_else(|_| "info".to_string());
            EnvFilter::new(level)
        });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let station: Station = match &cli.station {
        Some(slug) => slug.parse()?,
        None => config.get_feed_station()?,
    };
    info!(station = %station, "VrtCast starting");

    // ========== Phase 2: collaborators ==========

    let feed = VrtFeedClient::builder()
        .base_url(config.get_feed_base_url()?)
        .station(station)
        .page_size(config.get_feed_page_size()?)
        .build()?;

    let resolver = TubeClient::builder()
        .api_base(config.get_tube_api_base()?)
        .build()?;

    let player = PlaybackDriver::with_command(
        config.get_player_command()?,
        config.get_player_args()?,
    );

    let playlog = PlayLog::new(config.get_play_log_path()?);
    info!(play_log = %playlog.path().display(), "Play log ready");

    let start_from = if cli.past {
        match timestamp::prompt_start_time() {
            Some(ts) => Some(ts),
            None => {
                warn!("Invalid start time, following the live feed instead");
                None
            }
        }
    } else {
        None
    };

    // ========== Phase 3: playback loop ==========

    let mut session = Session::new(feed, resolver, player, playlog, start_from);
    session.run().await
}
