//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Unique violations are told apart by constraint name so the domain can
//! point the client at the offending field. Profile updates reuse the
//! `(id, version)` compare-and-swap of reviews; toggling `is_protected` alone
//! leaves the version unchanged.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{
    CreatedRecord, DateOfBirth, Email, Location, NewUser, ProfileHandle, User, UserChanges, UserId,
    Version,
};

use super::diesel_helpers::{
    DEFAULT_QUERY_TIMEOUT, cast_version, cast_version_for_db, log_diesel_error, pool_error_message,
    with_deadline,
};
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const EMAIL_CONSTRAINT: &str = "users_email_key";
const PROFILE_HANDLE_CONSTRAINT: &str = "users_profile_handle_key";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
    query_timeout: Duration,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Override the per-call deadline.
    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    UserRepositoryError::connection(pool_error_message(error))
}

fn map_unique_violation(constraint_name: Option<&str>, message: &str) -> UserRepositoryError {
    match constraint_name {
        Some(EMAIL_CONSTRAINT) => UserRepositoryError::duplicate_email(),
        Some(PROFILE_HANDLE_CONSTRAINT) => UserRepositoryError::duplicate_handle(),
        other => {
            warn!(
                constraint_name = ?other,
                message,
                "unrecognised unique violation on users"
            );
            UserRepositoryError::query("unique constraint violated")
        }
    }
}

fn map_diesel_error(error: DieselError, operation: &'static str) -> UserRepositoryError {
    log_diesel_error(&error, operation);

    match error {
        DieselError::NotFound => UserRepositoryError::not_found(),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            map_unique_violation(info.constraint_name(), info.message())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) => UserRepositoryError::query(info.message()),
        other => UserRepositoryError::query(other.to_string()),
    }
}

fn map_timeout(operation: &'static str) -> UserRepositoryError {
    UserRepositoryError::timeout(operation)
}

fn decode_error(field: &str, err: impl std::fmt::Display) -> UserRepositoryError {
    UserRepositoryError::query(format!("stored {field} is invalid: {err}"))
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    Ok(User {
        id: UserId::new(row.id).map_err(|err| decode_error("id", err))?,
        email: Email::new(row.email).map_err(|err| decode_error("email", err))?,
        profile_handle: ProfileHandle::new(row.profile_handle)
            .map_err(|err| decode_error("profile_handle", err))?,
        location: Location::new(row.location).map_err(|err| decode_error("location", err))?,
        date_of_birth: DateOfBirth::from_stored(row.date_of_birth),
        is_protected: row.is_protected,
        is_activated: row.is_activated,
        created_at: row.created_at,
        updated_at: row.updated_at,
        version: Version::new(cast_version(row.version)),
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<CreatedRecord<UserId>, UserRepositoryError> {
        let row = NewUserRow {
            email: user.email.as_str(),
            profile_handle: user.profile_handle.as_str(),
            password_hash: user.password_hash.as_str(),
            location: user.location.as_str(),
            date_of_birth: user.date_of_birth.date(),
        };

        with_deadline(self.query_timeout, "insert", map_timeout, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let (id, created_at, version) = diesel::insert_into(users::table)
                .values(&row)
                .returning((users::id, users::created_at, users::version))
                .get_result::<(i64, DateTime<Utc>, i32)>(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "insert"))?;

            Ok(CreatedRecord {
                id: UserId::new(id).map_err(|err| decode_error("id", err))?,
                created_at,
                version: Version::new(cast_version(version)),
            })
        })
        .await
    }

    async fn version_for(&self, id: UserId) -> Result<Version, UserRepositoryError> {
        with_deadline(self.query_timeout, "version lookup", map_timeout, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let version: i32 = users::table
                .find(id.get())
                .select(users::version)
                .first(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "version lookup"))?;
            Ok(Version::new(cast_version(version)))
        })
        .await
    }

    async fn update(
        &self,
        id: UserId,
        expected: Version,
        changes: &UserChanges,
    ) -> Result<User, UserRepositoryError> {
        let changeset = UserChangeset {
            email: changes.email().map(Email::as_str),
            profile_handle: changes.profile_handle().map(ProfileHandle::as_str),
            location: changes.location().map(Location::as_str),
            is_protected: changes.is_protected(),
            updated_at: Utc::now(),
        };
        let bump = i32::from(changes.touches_profile());

        with_deadline(self.query_timeout, "update", map_timeout, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = diesel::update(users::table)
                .filter(
                    users::id
                        .eq(id.get())
                        .and(users::version.eq(cast_version_for_db(expected.get()))),
                )
                .set((&changeset, users::version.eq(users::version + bump)))
                .returning(UserRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|err| map_diesel_error(err, "update"))?;

            let Some(row) = row else {
                return Err(UserRepositoryError::edit_conflict());
            };
            row_to_user(row)
        })
        .await
    }
}
