//! Creates the portfolio tables in the configured PostgreSQL database.
//!
//! Reads the same environment as the server, creates the database if the
//! server lacks it, then applies the embedded migrations. Safe to run
//! repeatedly.

use anyhow::Context;

use portfolio_backend::config::PortfolioConfig;
use portfolio_backend::persistence::{PersistenceGateway, PostgresGateway};
use portfolio_backend::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PortfolioConfig::from_env()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
    init_tracing(config.log_format);

    PostgresGateway::ensure_database(&config.database)
        .await
        .with_context(|| format!("cannot prepare database {}", config.database.target()))?;

    let gateway = PostgresGateway::from_config(&config.database)?.with_auto_migrate(false);
    tracing::info!(target_db = %gateway.target(), "initializing database");

    let result = gateway
        .migrate()
        .await
        .with_context(|| format!("database initialization failed for {}", gateway.target()));
    gateway.release().await;
    result?;

    tracing::info!(
        target_db = %gateway.target(),
        tables = "contact_messages, visitors",
        "database initialization complete"
    );
    Ok(())
}
