//! # Brains Sample Data Server
//!
//! The HTTP front door for the control-brain sample run table. This binary
//! loads one JSON dataset into memory at startup and serves it, together with
//! the browser front end, over a small fixed route set.
//!
//! ## Core Responsibilities:
//! - **Dataset Selection:** Prefers the operator-supplied real run table
//!   (`CONTROL_DATA_PATH`); falls back to the bundled public table when the
//!   real one is absent or unreadable, and logs which source won.
//! - **HTTP API:** `GET /brains` returns the loaded table, `GET /brains/{id}`
//!   looks up a single run by its `Run` accession, and the write-verb routes
//!   (`/create`, `/edit`, `/delete`) answer with fixed placeholder text
//!   without touching any state.
//! - **Static Front End:** Serves `index.html`, `app.js` and styling from the
//!   public asset directory under the site root.
//! - **Configuration:** Layered config from defaults, an optional JSON conf
//!   file, environment variables and CLI flags.
//! - **Lifecycle:** Graceful shutdown on `CTRL+C` or `SIGTERM`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;

use lib_common::samples::dataset::load_dataset;
use lib_common::service::routes::router;
use lib_common::service::state::AppState;

mod brains_logic;
use brains_logic::{config, logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file is optional: public deployments have none and end up on
    // the bundled dataset.
    dotenvy::dotenv().ok();

    let config = config::load_config();

    let log_dir = config
        .log_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_LOG_DIR));
    let log_level = config
        .log_level
        .clone()
        .unwrap_or_else(|| config::DEFAULT_LOG_LEVEL.to_string());
    logger::setup_logging(&log_dir, &log_level)?;

    // The dataset is resolved exactly once; only the bundled file failing to
    // load aborts startup.
    let public_data_path = config
        .public_data_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_PUBLIC_DATA));
    let (dataset, _source) =
        load_dataset(config.control_data_path.as_deref(), &public_data_path)?;

    let static_dir = config
        .static_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_STATIC_DIR));
    let state = Arc::new(AppState::new(dataset));
    let app = router(state, &static_dir);

    let port = config.port.unwrap_or(config::DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    log::info!("The server is running on port {}!", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Shutdown complete.");
    Ok(())
}

/// Resolves when either `CTRL+C` or, on UNIX, `SIGTERM` is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Ctrl-C received, initiating shutdown.");
        }
        _ = terminate => {
            log::info!("SIGTERM received, initiating shutdown.");
        }
    }
}
