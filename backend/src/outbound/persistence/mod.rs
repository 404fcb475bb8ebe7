//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Bounded calls**: every repository call runs under a deadline and
//!   reports expiry as a timeout error.
//!
//! # Example
//!
//! ```no_run
//! use cinepulse::outbound::persistence::{DbPool, DieselReviewRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), cinepulse::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/cinepulse")).await?;
//! let reviews = DieselReviewRepository::new(pool);
//! # let _ = reviews;
//! # Ok(())
//! # }
//! ```

mod diesel_helpers;
mod diesel_review_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_helpers::DEFAULT_QUERY_TIMEOUT;
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
