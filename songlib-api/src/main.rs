//! songlib-api - song catalogue HTTP service
//!
//! Serves CRUD, filtering and verse lookup over a SQLite songs table.
//! The database is migrated before the listener binds; if that fails the
//! process exits without serving traffic.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use songlib_api::store::{SongStore, SqliteSongStore};
use songlib_api::{build_router, AppState};
use songlib_common::config::{PartialConfig, ServiceConfig};
use tokio::signal;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default dotenv file, relative to the working directory
const DEFAULT_ENV_FILE: &str = "config/config.env";

/// Command-line arguments for songlib-api
#[derive(Parser, Debug)]
#[command(name = "songlib-api")]
#[command(about = "Song catalogue HTTP service")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "SONGLIB_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database URL
    #[arg(long, env = "DATABASE_ENDPOINT")]
    database_url: Option<String>,

    /// Address to listen on
    #[arg(short, long = "listen", env = "SERVER_ENDPOINT")]
    listen_addr: Option<String>,

    /// Log level when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Page size when the request has no valid `limit`
    #[arg(long, env = "DEFAULT_LIMIT")]
    default_limit: Option<i64>,

    /// Page when the request has no valid `page`
    #[arg(long, env = "DEFAULT_PAGE")]
    default_page: Option<i64>,

    /// Verse when the request has no valid `verse`
    #[arg(long, env = "DEFAULT_VERSE")]
    default_verse: Option<usize>,
}

impl Args {
    fn overrides(&self) -> PartialConfig {
        PartialConfig {
            database_url: self.database_url.clone(),
            listen_addr: self.listen_addr.clone(),
            log_level: self.log_level.clone(),
            default_limit: self.default_limit,
            default_page: self.default_page,
            default_verse: self.default_verse,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Environment file is optional; real environment variables win
    let env_file = std::env::var("SONGLIB_ENV_FILE").unwrap_or_else(|_| DEFAULT_ENV_FILE.to_string());
    let env_loaded = dotenvy::from_path(&env_file).is_ok();

    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => PartialConfig::from_toml_file(path)?,
        None => PartialConfig::default(),
    };
    let config = ServiceConfig::resolve(args.overrides(), file_config)
        .context("Invalid configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "songlib_api={level},songlib_common={level},tower_http={level}",
                    level = config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting songlib-api v{}", env!("CARGO_PKG_VERSION"));
    if env_loaded {
        info!("Loaded environment from {}", env_file);
    } else {
        debug!("No environment file at {}", env_file);
    }
    info!("Database: {}", config.database_url);

    let store = Arc::new(
        SqliteSongStore::open(&config.database_url)
            .await
            .context("Failed to initialize database")?,
    );
    info!("✓ Database ready");

    let state = AppState::new(store.clone(), config.defaults);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.listen_addr))?;
    info!("songlib-api listening on http://{}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    store.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
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
