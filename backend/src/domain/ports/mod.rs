//! Domain ports.
//!
//! Driven ports (repositories, the password hasher) are implemented by
//! outbound adapters. Driving ports (commands and queries) are implemented by
//! the domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod password_hasher;
mod review_repository;
mod reviews_command;
mod user_accounts_command;
mod user_repository;

#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{ReviewPage, ReviewRepository, ReviewRepositoryError};
#[cfg(test)]
pub use reviews_command::{MockReviewsCommand, MockReviewsQuery};
pub use reviews_command::{ReviewsCommand, ReviewsQuery, UpdateReviewRequest};
#[cfg(test)]
pub use user_accounts_command::MockUserAccountsCommand;
pub use user_accounts_command::{UpdateUserRequest, UserAccountsCommand};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepositoryError, UserRepository};
