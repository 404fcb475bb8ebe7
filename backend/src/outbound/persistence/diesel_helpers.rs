//! Shared helpers for Diesel repository implementations.
//!
//! - Deadline enforcement around whole repository calls
//! - Debug logging of Diesel failures before they are classified
//! - Integer casts between database and domain representations

use std::future::Future;
use std::time::Duration;

use diesel::result::Error as DieselError;
use tracing::debug;

use super::pool::PoolError;

/// Default per-call deadline for repository operations.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Extract a readable message from a pool error.
pub fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Emit debug context for a Diesel failure.
pub fn log_diesel_error(error: &DieselError, operation: &str) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = ?info.constraint_name(),
                %operation,
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            %operation,
            "diesel operation failed"
        ),
    }
}

/// Run `operation` under `deadline`, mapping expiry through `on_timeout`.
///
/// Dropping the timed-out future returns its pooled connection.
pub async fn with_deadline<T, E, F>(
    deadline: Duration,
    operation: &'static str,
    on_timeout: impl FnOnce(&'static str) -> E,
    fut: F,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(on_timeout(operation)),
    }
}

/// Cast database version (i32) to domain version (u32).
#[expect(
    clippy::cast_sign_loss,
    reason = "version is always positive in database"
)]
pub fn cast_version(version: i32) -> u32 {
    version as u32
}

/// Cast domain version (u32) to database version (i32).
#[expect(
    clippy::cast_possible_wrap,
    reason = "version values stay far below i32::MAX"
)]
pub fn cast_version_for_db(version: u32) -> i32 {
    version as i32
}

/// Cast a `count(*)` result to an unsigned total.
#[expect(clippy::cast_sign_loss, reason = "row counts are never negative")]
pub fn cast_count(count: i64) -> u64 {
    count as u64
}
