//! OfficeHub Server: office presence dashboards for chat communities.
//!
//! Main entry point that wires all crates together and starts the server.

use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use officehub_core::config::AppConfig;
use officehub_core::error::AppError;
use officehub_dashboard::RefreshTrigger;
use officehub_worker::CronScheduler;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file, environment overlay and `OFFICEHUB__*` variables
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("OFFICEHUB_CONFIG").unwrap_or_else(|_| "config/default".to_string());
    let env = std::env::var("OFFICEHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let base = config_path.trim_end_matches(".toml");
    AppConfig::load(base, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting OfficeHub v{}", env!("CARGO_PKG_VERSION"));

    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let worker_config = config.worker.clone();

    // ── Step 1: Backend client, publisher, engine, router ────────
    let services = officehub_api::build_services(config)?;
    let state = services.state;

    // ── Step 2: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 3: Refresh loop ─────────────────────────────────────
    let runner = services.runner;
    let runner_cancel = shutdown_rx.clone();
    let runner_handle = tokio::spawn(async move {
        runner.run(runner_cancel).await;
    });

    // ── Step 4: Periodic refresh ─────────────────────────────────
    let mut scheduler = CronScheduler::new(state.sync.clone(), worker_config).await?;
    scheduler.register_default_tasks().await?;
    scheduler.start().await?;

    // Surfaces are registered at runtime; an initial pass covers any that
    // were set up before the first timer tick.
    state.sync.submit(RefreshTrigger::timer());

    // ── Step 5: HTTP server ──────────────────────────────────────
    let app = officehub_api::build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("OfficeHub server listening on {}", addr);

    // ── Step 6: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 7: Wait for background tasks ────────────────────────
    if let Err(e) = scheduler.shutdown().await {
        tracing::warn!("Scheduler shutdown failed: {}", e);
    }

    tracing::info!("Waiting for the refresh loop to finish...");
    if tokio::time::timeout(grace, runner_handle).await.is_err() {
        tracing::warn!("Refresh loop did not stop within {:?}", grace);
    }

    tracing::info!("OfficeHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
