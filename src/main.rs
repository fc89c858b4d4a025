use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lichess_stats::api::state::AppState;
use lichess_stats::config::AppConfig;
use lichess_stats::fetch::LichessClient;

#[derive(Parser)]
#[command(name = "lichess-stats")]
#[command(about = "Aggregate statistics over a Lichess player's game history")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Bind address (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port number (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting lichess-stats v{}", env!("CARGO_PKG_VERSION"));

    let config = if cli.config.exists() {
        AppConfig::from_file(&cli.config)?
    } else {
        tracing::info!("No config file at {}, using defaults", cli.config.display());
        AppConfig::default()
    };

    let host = cli.host.unwrap_or_else(|| config.server.host.clone());
    let port = cli.port.unwrap_or(config.server.port);

    let client = LichessClient::new(config.lichess.clone())?;
    let state = AppState {
        provider: Arc::new(client),
    };

    let app = lichess_stats::api::build_router(state);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
