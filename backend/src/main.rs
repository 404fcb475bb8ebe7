//! Backend entry-point: loads settings, migrates the schema and serves the
//! versioned REST API.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use cinepulse::inbound::http::health::HealthState;
use cinepulse::outbound::persistence::{DbPool, run_migrations};

use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let pool_config = settings.pool_config().map_err(io::Error::other)?;
    let bcrypt_cost = settings.bcrypt_cost().map_err(io::Error::other)?;
    let rate_limit = settings.rate_limit().map_err(io::Error::other)?;
    let rate_limited = rate_limit.is_enabled();

    let database_url = pool_config.database_url().to_owned();
    let applied = tokio::task::spawn_blocking(move || run_migrations(&database_url))
        .await
        .map_err(io::Error::other)?
        .map_err(io::Error::other)?;
    info!(applied, "database migrations complete");

    let pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;
    info!("database connection pool established");

    let config = ServerConfig::new(settings.bind_addr(), pool, rate_limit)
        .with_query_timeout(settings.query_timeout())
        .with_bcrypt_cost(bcrypt_cost);
    let health_state = web::Data::new(HealthState::new(settings.environment()));
    let server = create_server(health_state, config)?;

    info!(
        addr = %settings.bind_addr(),
        env = settings.environment(),
        rate_limited,
        "starting server"
    );
    server.await?;
    info!("server stopped");
    Ok(())
}
