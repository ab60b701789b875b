//! artistes-api - Main entry point
//!
//! Serves the artist CRUD API over a single JSON data file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use artistes_api::api::buildinfo::BuildInfo;
use artistes_api::storage::JsonFileRepository;
use artistes_api::{build_router, AppState, ArtistService};
use artistes_common::config::{load_toml_config, ConfigOverrides, ServiceConfig};

/// Command-line arguments for artistes-api
#[derive(Parser, Debug)]
#[command(name = "artistes-api")]
#[command(about = "CRUD service for artist records stored in a JSON file")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "ARTISTES_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "ARTISTES_HOST")]
    host: Option<String>,

    /// JSON file holding the artist collection
    #[arg(short, long, env = "ARTISTES_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// TOML config file (defaults to <config dir>/artistes/config.toml)
    #[arg(short, long, env = "ARTISTES_CONFIG")]
    config: Option<PathBuf>,

    /// Create the data file with an empty collection if it is missing
    #[arg(long)]
    init_data_file: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml = load_toml_config(args.config.as_deref()).context("Failed to load config file")?;
    let from_toml = toml.is_some();
    let config = ServiceConfig::resolve(
        ConfigOverrides {
            data_file: args.data_file,
            host: args.host,
            port: args.port,
        },
        toml,
    );

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                let level = &config.log_level;
                format!("artistes_api={level},artistes_common={level},tower_http={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting {}", BuildInfo::current().banner());
    if from_toml {
        info!("Using TOML config file");
    }
    info!("Data file: {}", config.data_file.display());

    let repository = JsonFileRepository::new(&config.data_file);
    if args.init_data_file {
        repository
            .ensure_exists()
            .await
            .context("Failed to initialize data file")?;
    } else if !config.data_file.exists() {
        warn!(
            "Data file {} does not exist; requests will fail until it is created (see --init-data-file)",
            config.data_file.display()
        );
    }

    let service = ArtistService::new(Arc::new(repository));
    let state = AppState::new(service, config.data_file.display().to_string());
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
