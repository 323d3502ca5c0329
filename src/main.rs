//! portfolio-backend server entry point.
//!
//! Starts the Axum HTTP server and releases the store handle on shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;

use portfolio_backend::api;
use portfolio_backend::app_state::AppState;
use portfolio_backend::config::{PortfolioConfig, StorageBackend};
use portfolio_backend::error::ErrorPolicy;
use portfolio_backend::persistence::{
    MemoryGateway, PersistenceGateway, PostgresGateway, SharedGateway,
};
use portfolio_backend::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = PortfolioConfig::from_env()?;
    init_tracing(config.log_format);
    tracing::info!(
        addr = %config.listen_addr,
        backend = %config.storage_backend,
        expose_internal_errors = config.expose_internal_errors,
        "starting portfolio-backend"
    );

    // Build persistence layer
    let gateway: SharedGateway = match config.storage_backend {
        StorageBackend::Postgres => {
            let postgres = PostgresGateway::from_config(&config.database)?;
            // Nothing is cached on failure; the next request reconnects and,
            // with auto-migrate on, applies the schema first.
            if let Err(err) = postgres.ping().await {
                tracing::warn!(
                    target_db = %postgres.target(),
                    error = %err,
                    "database unavailable at startup"
                );
            }
            Arc::new(postgres)
        }
        StorageBackend::Memory => Arc::new(MemoryGateway::new()),
    };
    tracing::info!(backend = gateway.backend(), "persistence gateway ready");

    // Build application state and router
    let app_state = AppState::new(
        Arc::clone(&gateway),
        ErrorPolicy::new(config.expose_internal_errors),
    );
    let app = api::build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    gateway.release().await;
    tracing::info!("server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
