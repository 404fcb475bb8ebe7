//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{CreatedRecord, NewUser, User, UserChanges, UserId, Version};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The operation did not finish within the configured deadline.
        Timeout { operation: String } => "user repository {operation} timed out",
        /// No user exists with the requested identifier.
        NotFound => "user not found",
        /// The stored version no longer matches the expected one.
        EditConflict => "user was modified by another request",
        /// The e-mail address belongs to another account.
        DuplicateEmail => "a user with this email address already exists",
        /// The profile handle belongs to another account.
        DuplicateHandle => "a user with this profile handle already exists",
    }
}

/// Driven port for user account storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account at [`Version::INITIAL`].
    async fn insert(&self, user: &NewUser) -> Result<CreatedRecord<UserId>, UserRepositoryError>;

    /// Read the current version of an account.
    async fn version_for(&self, id: UserId) -> Result<Version, UserRepositoryError>;

    /// Apply `changes` when the stored version equals `expected`.
    ///
    /// The version advances only when a profile field changes.
    async fn update(
        &self,
        id: UserId,
        expected: Version,
        changes: &UserChanges,
    ) -> Result<User, UserRepositoryError>;
}
