//! Main entry point for the admin console host

use console_core::utils::{mask_secret, parse_socket_addr};
use console_core::{Config, context_error, context_error::Result, init_logging};
use console_server::build_router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: .env file not loaded: {e}");
    }

    let loaded = Config::load();
    let config = loaded.as_ref().map_or_else(|_| Config::default(), Clone::clone);

    init_logging(&config.logging)?;

    if let Err(err) = &loaded {
        warn!("Failed to load config ({}), using defaults", err);
    }

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║           Admin Console Host v{:<27}║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════════════════════════╝");

    for (name, backend) in &config.console.backends {
        info!(
            backend = %name,
            base_url = %backend.base_url,
            api_key = %backend.api_key.as_deref().map_or_else(|| "none".to_string(), mask_secret),
            "Configured backend"
        );
    }

    let addr: SocketAddr = parse_socket_addr(&config.server.host, config.server.port)?;

    let app = build_router(config.clone())
        .inspect_err(|e| error!("Invalid configuration: {}", e))?
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| context_error!("Failed to bind to {}: {}", addr, e))?;

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║                     SERVER READY                         ║");
    info!("╟──────────────────────────────────────────────────────────╢");
    info!("║ Dashboard: http://{}", addr);
    info!("║ Settings:  http://{}/config.json", addr);
    info!("║ Health:    http://{}/health", addr);
    info!("║ Assets:    {}", config.server.static_dir.display());
    info!("╚══════════════════════════════════════════════════════════╝");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| context_error!("Server error: {}", e))?;

    info!("Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received terminate signal, shutting down gracefully...");
        },
    }
}
