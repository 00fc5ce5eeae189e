//! Content Studio - web console for the content builder agent service

use anyhow::Result;
use clap::Parser;
use content_studio::config::StudioConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "content-studio")]
#[command(version)]
#[command(about = "Web console for the content builder agent service")]
struct Cli {
    /// Host to bind the console to
    #[arg(long, env = "STUDIO_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "STUDIO_PORT", default_value_t = 8501)]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("content_studio={},tower_http=debug", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = StudioConfig::from_env();
    config.server.host = cli.host;
    config.server.port = cli.port;

    tracing::info!(
        backend = %config.backend.display_url(),
        "Starting Content Studio"
    );

    content_studio::api::start_server(config).await?;
    Ok(())
}
