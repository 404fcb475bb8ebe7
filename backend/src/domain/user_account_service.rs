//! User account domain service.
//!
//! Registration hashes the password through the [`PasswordHasher`] port
//! before anything reaches the store. Duplicate e-mail addresses and handles
//! are reported as field-level validation errors so clients can highlight
//! the offending input.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::domain::ports::{
    PasswordHasher, UpdateUserRequest, UserAccountsCommand, UserRepository, UserRepositoryError,
};
use crate::domain::review_service::{EDIT_CONFLICT_MESSAGE, NOT_FOUND_MESSAGE};
use crate::domain::{
    CreatedRecord, Error, NewUser, Registration, User, UserId, Version, field_error,
};

fn map_repository_error(err: UserRepositoryError) -> Error {
    match err {
        UserRepositoryError::NotFound => Error::not_found(NOT_FOUND_MESSAGE),
        UserRepositoryError::EditConflict => Error::conflict(EDIT_CONFLICT_MESSAGE),
        UserRepositoryError::DuplicateEmail => field_error("email", err.to_string()),
        UserRepositoryError::DuplicateHandle => field_error("profile_handle", err.to_string()),
        UserRepositoryError::Connection { .. }
        | UserRepositoryError::Query { .. }
        | UserRepositoryError::Timeout { .. } => {
            error!(error = %err, "user repository failure");
            Error::internal(err.to_string())
        }
    }
}

/// Account service implementing [`UserAccountsCommand`].
#[derive(Clone)]
pub struct UserAccountService<U, H> {
    user_repo: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> UserAccountService<U, H> {
    /// Create a new service with the given store and hasher.
    pub fn new(user_repo: Arc<U>, hasher: Arc<H>) -> Self {
        Self { user_repo, hasher }
    }
}

#[async_trait]
impl<U, H> UserAccountsCommand for UserAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: Registration) -> Result<CreatedRecord<UserId>, Error> {
        let password_hash = self
            .hasher
            .hash(&registration.password)
            .await
            .map_err(|err| {
                error!(error = %err, "password hashing failed");
                Error::internal(err.to_string())
            })?;

        let new_user = NewUser {
            email: registration.email,
            profile_handle: registration.profile_handle,
            password_hash,
            location: registration.location,
            date_of_birth: registration.date_of_birth,
        };

        self.user_repo
            .insert(&new_user)
            .await
            .map_err(map_repository_error)
    }

    async fn current_version(&self, id: UserId) -> Result<Version, Error> {
        self.user_repo
            .version_for(id)
            .await
            .map_err(map_repository_error)
    }

    async fn update(&self, request: UpdateUserRequest) -> Result<User, Error> {
        self.user_repo
            .update(request.id, request.expected_version, &request.changes)
            .await
            .map_err(map_repository_error)
    }
}
