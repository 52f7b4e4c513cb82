//! Fault injection demo server
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use fault_server::{AppConfig, create_router, serve};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first so the log format can be honoured
    let loaded = AppConfig::load();
    let json_logs = loaded
        .as_ref()
        .is_ok_and(|config| config.server.json_logs());

    init_tracing(json_logs);

    info!("Fault server v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    let engine = Arc::new(config.build_engine()?);

    info!(
        enabled = config.fault.enabled,
        inject_percent = config.fault.inject_percent,
        blacklist = ?config.fault.path_blacklist,
        whitelist = ?config.fault.path_whitelist,
        rand_seed = config.fault.rand_seed,
        injector = ?config.injector,
        "Fault engine configured"
    );

    let app = create_router(Some(engine)).layer(TraceLayer::new_for_http());

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Injection stats: http://{}/fault/stats", addr);

    serve(
        listener,
        app,
        shutdown_signal(),
        config.server.shutdown_timeout(),
    )
    .await?;

    info!("Server shutdown complete");

    Ok(())
}

fn init_tracing(json_logs: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fault_server=debug,fault_engine=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
