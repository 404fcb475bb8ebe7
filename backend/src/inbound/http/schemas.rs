//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The write lost a race or collides with an existing record.
    #[schema(rename = "conflict")]
    Conflict,
    /// One or more fields failed validation.
    #[schema(rename = "unprocessable_entity")]
    UnprocessableEntity,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "unprocessable_entity")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "failed validation")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field messages for validation failures.
    #[schema(example = json!({"rating": "must be greater than zero"}))]
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Statement`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Statement)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StatementSchema {
    /// Statement text, at most 280 characters.
    #[schema(example = "A patient, luminous slow burn.")]
    comment: String,
    /// When the statement was first written.
    created_at: DateTime<Utc>,
    /// When the statement text last changed.
    updated_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::Review`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Review)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ReviewSchema {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    id: i64,
    /// Film reference.
    #[schema(example = "tt0111161")]
    imdb_id: String,
    /// Star rating from 1 to 5.
    #[schema(example = 4, minimum = 1, maximum = 5)]
    rating: i16,
    /// Reviewer statement.
    statement: StatementSchema,
    /// Reacting user ids keyed by reaction name.
    reactions: BTreeMap<String, Vec<i64>>,
    /// Insert time.
    created_at: DateTime<Utc>,
    /// Last update time.
    updated_at: DateTime<Utc>,
    /// Concurrency token.
    #[schema(example = 1)]
    version: u32,
}

/// OpenAPI schema for [`crate::domain::CreatedRecord`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CreatedRecord)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreatedRecordSchema {
    /// New identifier.
    #[schema(example = 1)]
    id: i64,
    /// Insert time.
    created_at: DateTime<Utc>,
    /// Always 1 for a new record.
    #[schema(example = 1)]
    version: u32,
}

/// OpenAPI schema for [`pagination::Metadata`].
///
/// Every field is omitted when zero, so an empty listing returns `{}`.
#[derive(ToSchema)]
#[schema(as = pagination::Metadata)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MetadataSchema {
    /// Page that was requested.
    #[schema(example = 1)]
    current_page: Option<u64>,
    /// Records per page.
    #[schema(example = 20)]
    page_size: Option<u64>,
    /// Always one when any records exist.
    #[schema(example = 1)]
    first_page: Option<u64>,
    /// Final page number.
    #[schema(example = 3)]
    last_page: Option<u64>,
    /// Records in the whole collection.
    #[schema(example = 42)]
    total_records: Option<u64>,
}

/// OpenAPI schema for [`crate::domain::User`].
///
/// Stored account without credentials.
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Store-assigned identifier.
    #[schema(example = 7)]
    id: i64,
    /// Account e-mail.
    #[schema(example = "ada@example.com")]
    email: String,
    /// Public profile handle.
    #[schema(example = "ada")]
    profile_handle: String,
    /// Free-form location.
    #[schema(example = "London")]
    location: String,
    /// Date of birth.
    date_of_birth: NaiveDate,
    /// Whether the profile is hidden from other users.
    is_protected: bool,
    /// Whether the account has been activated.
    is_activated: bool,
    /// Insert time.
    created_at: DateTime<Utc>,
    /// Last update time.
    updated_at: DateTime<Utc>,
    /// Concurrency token.
    #[schema(example = 1)]
    version: u32,
}

/// Confirmation payload for operations without a resource body.
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    #[schema(example = "review successfully deleted")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    fn error_code_schema_variants_match_domain() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        for code in [
            "invalid_request",
            "not_found",
            "conflict",
            "unprocessable_entity",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[rstest]
    fn error_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("traceId"), "schema should use camelCase");
        assert!(schema_json.contains("details"));
    }

    #[rstest]
    #[case(ReviewSchema::name(), "crate.domain.Review")]
    #[case(StatementSchema::name(), "crate.domain.Statement")]
    #[case(CreatedRecordSchema::name(), "crate.domain.CreatedRecord")]
    #[case(MetadataSchema::name(), "pagination.Metadata")]
    #[case(UserSchema::name(), "crate.domain.User")]
    fn wrappers_register_domain_names(
        #[case] name: std::borrow::Cow<'static, str>,
        #[case] expected: &str,
    ) {
        assert_eq!(name, expected);
    }

    #[rstest]
    fn review_schema_documents_statement_and_reactions() {
        let schema_json = schema_to_json::<ReviewSchema>();
        assert!(schema_json.contains("statement"));
        assert!(schema_json.contains("reactions"));
        assert!(schema_json.contains("imdb_id"));
    }

    #[rstest]
    fn user_schema_omits_credentials() {
        let schema_json = schema_to_json::<UserSchema>();
        assert!(schema_json.contains("profile_handle"));
        assert!(!schema_json.contains("password"));
    }
}
