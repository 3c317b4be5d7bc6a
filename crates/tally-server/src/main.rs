//! tally server binary.
//!
//! - Config: `TALLY_CONFIG` (default `tally.yaml`)
//! - Logging: `RUST_LOG` (default `info`)
//! - Snapshot stores autosave in the background and save once more on shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tracing_subscriber::{fmt, EnvFilter};

use tally_core::clock::SystemClock;
use tally_core::error::{Result, TallyError};
use tally_server::store::{self, OpenedStore};
use tally_server::{app_state, config, router};

const DEFAULT_CONFIG_PATH: &str = "tally.yaml";

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        tracing::error!(code = e.client_code().as_str(), error = %e, "tally-server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::var("TALLY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg.server.listen.parse().map_err(|e| {
        TallyError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}"))
    })?;

    let mut autosave = None;
    let opened = match &cfg.store {
        Some(section) => {
            let opened = store::open(section).await?;
            if let OpenedStore::Snapshot(snap) = &opened {
                let every = Duration::from_secs(section.snapshot_interval_secs);
                autosave = Some(tokio::spawn(Arc::clone(snap).autosave_loop(every)));
            }
            Some(opened)
        }
        None => {
            tracing::warn!("no store configured; every request will fail with NotConfigured");
            None
        }
    };

    if cfg.admin.token.is_none() {
        tracing::warn!("admin.token unset; the reset endpoint is open to any caller");
    }

    tracing::info!(
        config = %path,
        prefix = %cfg.server.api_prefix,
        utc_offset_hours = cfg.calendar.utc_offset_hours,
        retention_min_days = cfg.retention.min_age_days,
        retention_max_days = cfg.retention.max_age_days,
        "configuration loaded"
    );

    let state = app_state::AppState::new(
        cfg,
        opened.as_ref().map(OpenedStore::as_kv),
        Arc::new(SystemClock),
    )?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| TallyError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, "tally-server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TallyError::Internal(format!("server failed: {e}")))?;

    if let Some(task) = autosave {
        task.abort();
        // wait for an in-flight save to finish or be cancelled
        let _ = task.await;
    }

    if let Some(OpenedStore::Snapshot(snap)) = &opened {
        let n = snap.save().await?;
        tracing::info!(entries = n, path = %snap.path().display(), "final snapshot saved");
    }

    tracing::info!("tally-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
        tracing::info!("received ctrl-c, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
