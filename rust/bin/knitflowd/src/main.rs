//! `knitflowd` — the knitflow API server.
//!
//! Usage:
//!   knitflowd [-c <config.toml>] [--listen <addr>] [--data-dir <dir>] [--db <file>]
//!
//! Without a data directory or db file, role page access lives in memory only.

mod config;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use knitflow_core::Module;
use tracing::{info, warn};

use config::ServerConfig;

/// knitflow server.
#[derive(Parser, Debug)]
#[command(name = "knitflowd", about = "Knitting production and access API server")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Listen address (overrides the config file).
    #[arg(long = "listen")]
    listen: Option<String>,

    /// Data directory for the redb store (overrides the config file).
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// redb database file (overrides the config file).
    #[arg(long = "db")]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ServerConfig::load(path)?
        }
        None => ServerConfig::default(),
    };
    let mut config = file_config.into_service_config(cli.listen);
    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir;
    }
    if cli.db.is_some() {
        config.db_path = cli.db;
    }

    let persistent = config.data_dir.is_some() || config.db_path.is_some();
    let kv: Arc<dyn knitflow_kv::KVStore> = if persistent {
        let path = config.resolve_db_path();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        info!("Opening store at {}", path.display());
        Arc::new(
            knitflow_kv::RedbStore::open(&path)
                .map_err(|e| anyhow::anyhow!("failed to open KV store: {}", e))?,
        )
    } else {
        warn!("No data directory configured, role page access will not persist");
        Arc::new(knitflow_kv::MemoryStore::new())
    };

    let modules: Vec<Box<dyn Module>> = vec![
        Box::new(production::ProductionModule::new(production::ProductionSettings {
            display_decimals: config.display_decimals,
        })),
        Box::new(access::AccessModule::new(kv, access::navigation())),
    ];
    for module in &modules {
        info!("{} module initialized", module.name());
    }

    let app = routes::build_router(&modules);

    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    info!("knitflow server listening on {}", config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
