//! Passenger survival scoring service (survival-api) - Main entry point
//!
//! Loads configuration, opens the record store, prepares the classifier and
//! serves the HTTP API until Ctrl+C / SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use survival_api::model::{ArtifactClassifier, ArtifactSource};
use survival_api::store::SqliteRecordStore;
use survival_api::{build_router, AppState, PassengerService};
use survival_common::config::ServiceConfig;
use survival_common::events::EventLog;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for survival-api
#[derive(Parser, Debug)]
#[command(name = "survival-api")]
#[command(about = "Titanic passenger survival scoring service")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "SURVIVAL_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "SURVIVAL_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SURVIVAL_PORT")]
    port: Option<u16>,

    /// SQLite database file
    #[arg(long, env = "SURVIVAL_DATABASE")]
    database: Option<PathBuf>,

    /// Local model artifact path
    #[arg(long, env = "SURVIVAL_MODEL_PATH")]
    model_path: Option<PathBuf>,
}

impl Args {
    /// Command-line flags take priority over every other source
    fn apply(self, config: &mut ServiceConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(database) = self.database {
            config.database_path = database;
        }
        if let Some(model_path) = self.model_path {
            config.model_path = model_path;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "survival_api=info,survival_common=info,survival=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting survival-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let mut config =
        ServiceConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply(&mut config);
    info!(
        "Environment: {}, table: {}, database: {}",
        config.environment,
        config.table_name,
        config.database_path.display()
    );

    let events = EventLog::new(
        config.environment.clone(),
        config.log_group.clone(),
        config.log_stream.clone(),
    );

    let store = SqliteRecordStore::open(&config.database_path, &config.table_name)
        .await
        .context("Failed to open record store")?;
    info!("✓ Record store ready");

    let source = ArtifactSource::from_config(&config);
    let classifier = Arc::new(ArtifactClassifier::new(source, events.clone()));
    // Warm the model cache; a failure here is retried on the first scoring request
    if let Err(e) = classifier.load().await {
        warn!(
            "Model artifact not loaded at startup ({}): {}",
            classifier.source().describe(),
            e
        );
    }

    let service = PassengerService::new(classifier, Arc::new(store), events);
    let app = build_router(AppState::new(service));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.host, config.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("survival-api listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
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
