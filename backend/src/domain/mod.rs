//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities shared by the HTTP and persistence
//! adapters, plus the services implementing the driving ports. Types are
//! built through validating constructors so adapters cannot hold values that
//! break storage constraints.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Review and its components, ReviewChanges, Version.
//! - User and its components, Registration, UserChanges.
//! - Validator: per-field accumulator for request validation.
//! - ReviewService / UserAccountService: driving port implementations.

pub mod error;
pub mod ports;
pub mod review;
pub mod review_service;
pub mod trace_id;
pub mod user;
pub mod user_account_service;
pub mod validation;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::review::{
    CreatedRecord, EmptyChanges, ImdbId, NewReview, RATING_MAX, RATING_MIN, Rating, Reaction,
    ReactionMap, Review, ReviewChanges, ReviewId, ReviewValidationError, STATEMENT_COMMENT_MAX,
    Statement, StatementComment, Version,
};
pub use self::review_service::{EDIT_CONFLICT_MESSAGE, NOT_FOUND_MESSAGE, ReviewService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DateOfBirth, Email, Location, MAX_AGE_YEARS, MIN_AGE_YEARS, NewUser, PASSWORD_MAX_BYTES,
    PASSWORD_MIN_BYTES, PROFILE_HANDLE_MAX, PROFILE_HANDLE_MIN, PasswordHash, PlaintextPassword,
    ProfileHandle, Registration, User, UserChanges, UserId, UserValidationError,
};
pub use self::user_account_service::UserAccountService;
pub use self::validation::{FAILED_VALIDATION_MESSAGE, Validator, field_error};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use cinepulse::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u32> {
///     Err(Error::not_found("the requested resource could not be found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
