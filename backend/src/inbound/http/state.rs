//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{ReviewsCommand, ReviewsQuery, UserAccountsCommand};

/// Parameter object bundling the driving ports used by HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Review writes.
    pub reviews: Arc<dyn ReviewsCommand>,
    /// Review reads.
    pub reviews_query: Arc<dyn ReviewsQuery>,
    /// Account registration and profile updates.
    pub users: Arc<dyn UserAccountsCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Review writes.
    pub reviews: Arc<dyn ReviewsCommand>,
    /// Review reads.
    pub reviews_query: Arc<dyn ReviewsQuery>,
    /// Account registration and profile updates.
    pub users: Arc<dyn UserAccountsCommand>,
    /// Source of "today" for age checks on registration.
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Construct state from a ports bundle and a clock.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use cinepulse::domain::{ReviewService, UserAccountService};
    /// use cinepulse::inbound::http::state::{HttpState, HttpStatePorts};
    /// use cinepulse::outbound::password::BcryptPasswordHasher;
    /// use cinepulse::outbound::persistence::{
    ///     DbPool, DieselReviewRepository, DieselUserRepository, PoolConfig,
    /// };
    /// use mockable::DefaultClock;
    ///
    /// # async fn build() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/cinepulse")).await?;
    /// let reviews = Arc::new(ReviewService::new(Arc::new(DieselReviewRepository::new(
    ///     pool.clone(),
    /// ))));
    /// let users = Arc::new(UserAccountService::new(
    ///     Arc::new(DieselUserRepository::new(pool)),
    ///     Arc::new(BcryptPasswordHasher::default()),
    /// ));
    /// let state = HttpState::new(
    ///     HttpStatePorts {
    ///         reviews: reviews.clone(),
    ///         reviews_query: reviews,
    ///         users,
    ///     },
    ///     Arc::new(DefaultClock),
    /// );
    /// let _reviews = state.reviews.clone();
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(ports: HttpStatePorts, clock: Arc<dyn Clock>) -> Self {
        let HttpStatePorts {
            reviews,
            reviews_query,
            users,
        } = ports;
        Self {
            reviews,
            reviews_query,
            users,
            clock,
        }
    }
}
