mod top_videos;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::top_videos::TopVideosArgs;

#[derive(Debug, Parser)]
#[command(name = "reelscout")]
#[command(about = "Find recent high-performing videos to use as content inspiration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Retrieve, filter, and rank the top videos for a business profile
    TopVideos(TopVideosArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = reelscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // Logs go to stderr so stdout stays parseable JSON.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(config = ?config, "configuration loaded");

    match cli.command {
        Commands::TopVideos(args) => top_videos::run(&config, &args).await,
    }
}
