//! tourmap-ui - Tour schedule HTTP service
//!
//! Serves the public concert/city/venue read API consumed by the map
//! frontend, plus the password-gated admin API for mutating the schedule.
//! Persistence is a whole-document JSON blob store under the resolved root
//! folder.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tourmap_common::config;
use tourmap_common::store::FsBlobStore;
use tourmap_common::sync::SyncPipeline;
use tourmap_ui::{build_router, AppState};
use tracing::info;

/// Command-line arguments; anything omitted falls back to environment
/// variables, the TOML config file, then compiled defaults.
#[derive(Debug, Parser)]
#[command(name = "tourmap-ui", version)]
struct Args {
    /// Data root folder (blob documents live under <root>/data/)
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// HTTP listen port
    #[arg(long)]
    port: Option<u16>,

    /// Admin Gate password
    #[arg(long)]
    admin_password: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification IMMEDIATELY after tracing init
    info!(
        "Starting Tourmap UI (tourmap-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    info!("Data root folder: {}", root_folder.display());

    let admin_password = config::resolve_admin_password(args.admin_password.as_deref());
    if admin_password == config::DEFAULT_ADMIN_PASSWORD {
        info!("Admin password not configured - using the compiled default");
    } else {
        info!("✓ Loaded admin password for the Admin Gate");
    }

    let store = FsBlobStore::new(root_folder);
    let pipeline = SyncPipeline::new(store);

    let state = AppState::new(pipeline, admin_password);
    let app = build_router(state);

    let port = config::resolve_port(args.port);
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    info!("tourmap-ui listening on http://127.0.0.1:{}", port);
    info!("Health check: http://127.0.0.1:{}/health", port);

    axum::serve(listener, app).await?;

    Ok(())
}
