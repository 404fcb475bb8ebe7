//! Process settings loaded via OrthoConfig.
//!
//! Values come from `CINEPULSE_*` environment variables, an optional
//! configuration file, and command-line flags, in increasing precedence.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use cinepulse::middleware::{DEFAULT_LIMITER_BURST, DEFAULT_LIMITER_RPS, RateLimit, RateLimitError};
use cinepulse::outbound::password::DEFAULT_BCRYPT_COST;
use cinepulse::outbound::persistence::PoolConfig;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_MAX_OPEN_CONNS: u32 = 25;
const DEFAULT_MIN_IDLE: u32 = 2;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_QUERY_TIMEOUT_MS: u64 = 3000;

/// Settings controlling the listener, the database pool, hashing cost and
/// request throttling.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CINEPULSE")]
pub struct AppSettings {
    /// TCP port for the HTTP listener.
    pub port: Option<u16>,
    /// Deployment label reported by the healthcheck.
    pub env: Option<String>,
    /// PostgreSQL connection string.
    pub db_dsn: Option<String>,
    /// Upper bound on open pool connections.
    pub db_max_open_conns: Option<u32>,
    /// Idle connections kept warm.
    pub db_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_connection_timeout_secs: Option<u64>,
    /// Per-call repository deadline in milliseconds.
    pub db_query_timeout_ms: Option<u64>,
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: Option<u32>,
    /// Requests per second allowed for each client.
    pub limiter_rps: Option<u32>,
    /// Requests a client may send back to back.
    pub limiter_burst: Option<u32>,
    /// Turns per-client throttling on or off.
    pub limiter_enabled: Option<bool>,
}

/// Errors raised when settings cannot be turned into a runnable server.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    /// No database connection string was supplied.
    #[error("database DSN is required (set CINEPULSE_DB_DSN or --db-dsn)")]
    MissingDsn,
    /// The bcrypt cost is outside the range the algorithm accepts.
    #[error("bcrypt cost must be between 4 and 31, got {0}")]
    BcryptCost(u32),
    /// The limiter rates cannot be used.
    #[error(transparent)]
    RateLimit(#[from] RateLimitError),
}

impl AppSettings {
    /// Listener port, defaulting to 4000.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Address the server binds to on all interfaces.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port()))
    }

    /// Deployment label, defaulting to `development`.
    pub fn environment(&self) -> &str {
        self.env.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }

    /// Database connection string.
    ///
    /// # Errors
    /// Returns [`SettingsError::MissingDsn`] when unset or blank.
    pub fn db_dsn(&self) -> Result<&str, SettingsError> {
        self.db_dsn
            .as_deref()
            .map(str::trim)
            .filter(|dsn| !dsn.is_empty())
            .ok_or(SettingsError::MissingDsn)
    }

    /// Repository deadline.
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.db_query_timeout_ms.unwrap_or(DEFAULT_QUERY_TIMEOUT_MS))
    }

    /// Validated bcrypt cost, defaulting to 12.
    ///
    /// # Errors
    /// Returns [`SettingsError::BcryptCost`] outside 4..=31.
    pub fn bcrypt_cost(&self) -> Result<u32, SettingsError> {
        let cost = self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST);
        if (4..=31).contains(&cost) {
            Ok(cost)
        } else {
            Err(SettingsError::BcryptCost(cost))
        }
    }

    /// Per-client throttling, enabled by default at 2 requests per second
    /// with a burst of 5.
    ///
    /// # Errors
    /// Returns [`SettingsError::RateLimit`] when the rate or burst is zero.
    pub fn rate_limit(&self) -> Result<RateLimit, SettingsError> {
        Ok(RateLimit::new(
            self.limiter_rps.unwrap_or(DEFAULT_LIMITER_RPS),
            self.limiter_burst.unwrap_or(DEFAULT_LIMITER_BURST),
            self.limiter_enabled.unwrap_or(true),
        )?)
    }

    /// Pool configuration derived from the `db_*` settings.
    ///
    /// # Errors
    /// Returns [`SettingsError::MissingDsn`] when no DSN is configured.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let min_idle = self.db_min_idle.unwrap_or(DEFAULT_MIN_IDLE);
        Ok(PoolConfig::new(self.db_dsn()?)
            .with_max_size(self.db_max_open_conns.unwrap_or(DEFAULT_MAX_OPEN_CONNS))
            .with_min_idle((min_idle > 0).then_some(min_idle))
            .with_connection_timeout(Duration::from_secs(
                self.db_connection_timeout_secs
                    .unwrap_or(DEFAULT_CONNECTION_TIMEOUT_SECS),
            )))
    }
}
