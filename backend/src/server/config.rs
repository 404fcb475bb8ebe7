//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use cinepulse::middleware::RateLimit;
use cinepulse::outbound::password::DEFAULT_BCRYPT_COST;
use cinepulse::outbound::persistence::{DEFAULT_QUERY_TIMEOUT, DbPool};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) query_timeout: Duration,
    pub(crate) bcrypt_cost: u32,
    pub(crate) rate_limit: RateLimit,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr` over `db_pool`,
    /// throttling clients with `rate_limit`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, rate_limit: RateLimit) -> Self {
        Self {
            bind_addr,
            db_pool,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            rate_limit,
        }
    }

    /// Override the deadline applied to each repository call.
    #[must_use]
    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    /// Override the bcrypt work factor used for new password hashes.
    #[must_use]
    pub fn with_bcrypt_cost(mut self, bcrypt_cost: u32) -> Self {
        self.bcrypt_cost = bcrypt_cost;
        self
    }
}
