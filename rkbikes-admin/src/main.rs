//! RK Bikes Admin - Main entry point
//!
//! REST backend for the motorcycle dealership admin console: CRUD gateway
//! over SQLite, booking status lifecycle, and the new-booking watermark
//! monitor.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rkbikes_admin::monitor::BookingMonitor;
use rkbikes_admin::{build_router, AppState};
use rkbikes_common::events::EventBus;
use rkbikes_common::{config, db};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for rkbikes-admin
#[derive(Parser, Debug)]
#[command(name = "rkbikes-admin")]
#[command(about = "Admin backend for the RK Bikes dealership")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "4000", env = "RKBIKES_PORT")]
    port: u16,

    /// Root folder holding the database (resolution falls back to
    /// RKBIKES_ROOT_FOLDER, the config file, then the OS default)
    #[arg(short, long, env = "RKBIKES_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Seconds between new-booking watermark checks
    #[arg(long, default_value = "20", env = "RKBIKES_POLL_INTERVAL_SECS")]
    poll_interval_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rkbikes_admin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Log build identification immediately after tracing init
    info!(
        "Starting RK Bikes Admin (rkbikes-admin) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    config::ensure_root_folder(&root_folder).context("Failed to create root folder")?;

    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = db::init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    let event_bus = Arc::new(EventBus::new(256));
    let state = AppState::new(pool, event_bus);

    // Spawn the new-booking watermark monitor; it runs until the process ends
    let monitor = BookingMonitor::new(
        state.db.clone(),
        state.event_bus.clone(),
        state.pending_notification.clone(),
        Duration::from_secs(args.poll_interval_secs),
    );
    tokio::spawn(monitor.run());
    info!(
        "Booking monitor started (checking every {}s)",
        args.poll_interval_secs
    );

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port))
        .await
        .context("Failed to bind listener")?;
    info!("rkbikes-admin listening on http://0.0.0.0:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
