//! HR engine demo server.
//!
//! Serves the HR API over an in-memory store, optionally preloaded with
//! reference data.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use hr_engine::api::{AppState, create_router};
use hr_engine::config::{ConfigLoader, SeedData};
use hr_engine::store::InMemoryStore;

/// HR engine API server
#[derive(Parser)]
#[command(name = "hr-engine")]
#[command(version)]
#[command(about = "Leave, attendance and work-from-home API over an in-memory store")]
struct Cli {
    /// Directory holding hr_config.yaml and leave_policy.yaml
    #[arg(long, default_value = "./config/default")]
    config: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: String,

    /// YAML file of companies, holidays and employees to preload
    #[arg(long)]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConfigLoader::load(&cli.config)?;
    info!(config = %cli.config.display(), "Configuration loaded");

    let mut store = InMemoryStore::new();
    if let Some(seed) = &cli.seed {
        SeedData::load(seed)?.apply(&mut store)?;
    }

    let app = create_router(AppState::new(config, store));
    let listener = tokio::net::TcpListener::bind(&cli.bind).await?;
    info!("Listening on http://{}", cli.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
