//! Driving port for account registration and profile edits.

use async_trait::async_trait;

use crate::domain::{CreatedRecord, Error, Registration, User, UserChanges, UserId, Version};

/// Versioned update of a user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserRequest {
    /// Account to change.
    pub id: UserId,
    /// Version the caller read before submitting changes.
    pub expected_version: Version,
    /// Submitted fields.
    pub changes: UserChanges,
}

/// Write-side operations on user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccountsCommand: Send + Sync {
    /// Hash the password and store a new account.
    async fn register(&self, registration: Registration) -> Result<CreatedRecord<UserId>, Error>;

    /// Capture the version an edit will be checked against.
    async fn current_version(&self, id: UserId) -> Result<Version, Error>;

    /// Apply a versioned profile update.
    async fn update(&self, request: UpdateUserRequest) -> Result<User, Error>;
}
