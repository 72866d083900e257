use anyhow::{Context, Result};
use backend_lib::{
    config::{Settings, DEFAULT_CONFIG_FILE},
    create_router,
    storage::{MemoryStore, PgStore, Store},
    AppState,
};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Chirpy HTTP server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file
    #[arg(short, long, env = "CHIRPY_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Override the configured bind address
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load_from(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if let Some(bind) = cli.bind {
        settings.bind_addr = bind;
    }

    init_tracing(&settings);
    tracing::info!(platform = %settings.platform, "Starting Chirpy server");

    match settings.db_url.clone() {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let store = PgStore::connect(&url)
                .await
                .context("Failed to create database pool")?;

            tracing::info!("Running database migrations...");
            store.migrate().await.context("Failed to run migrations")?;

            serve(store, settings).await
        },
        None => {
            tracing::warn!("DB_URL not set, data is kept in memory only");
            serve(MemoryStore::new(), settings).await
        },
    }
}

/// `RUST_LOG` wins over the configured level
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if settings.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn serve<S: Store>(store: S, settings: Settings) -> Result<()> {
    let addr = settings.bind_addr;
    let state = Arc::new(AppState::new(store, settings)?);
    let app = create_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("shutdown signal received");
}
