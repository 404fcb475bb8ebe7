//! Shared parsing helpers for inbound HTTP adapters.

use pagination::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PageRequest};

use crate::domain::{Error, ReviewId, UserId, Validator};

/// Message used when a path identifier is malformed or not positive.
pub const INVALID_ID_MESSAGE: &str = "invalid id parameter";

const NOT_AN_INTEGER: &str = "must be an integer";

fn parse_positive_id<T, E>(raw: &str, build: impl FnOnce(i64) -> Result<T, E>) -> Result<T, Error> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|id| build(id).ok())
        .ok_or_else(|| Error::invalid_request(INVALID_ID_MESSAGE))
}

/// Parse the `{id}` path segment of a review route.
///
/// # Errors
///
/// Returns a 400 error when the segment is not a positive integer.
///
/// # Examples
/// ```
/// use cinepulse::inbound::http::validation::parse_review_id;
///
/// assert_eq!(parse_review_id("7").map(|id| id.get()).ok(), Some(7));
/// assert!(parse_review_id("0").is_err());
/// ```
pub fn parse_review_id(raw: &str) -> Result<ReviewId, Error> {
    parse_positive_id(raw, ReviewId::new)
}

/// Parse the `{id}` path segment of a user route.
///
/// # Errors
///
/// Returns a 400 error when the segment is not a positive integer.
pub fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    parse_positive_id(raw, UserId::new)
}

/// Read an optional integer query value, recording a field error when it
/// does not parse. Missing or empty values fall back to `default`.
pub fn read_int(
    raw: Option<&str>,
    field: &str,
    default: i64,
    validator: &mut Validator,
) -> Option<i64> {
    match raw.map(str::trim) {
        None | Some("") => Some(default),
        Some(value) => validator.record(field, value.parse::<i64>().map_err(|_| NOT_AN_INTEGER)),
    }
}

/// Build a page request from raw `page` and `page_size` query values.
///
/// # Errors
///
/// Returns a 422 error listing every malformed or out-of-range field.
pub fn parse_page_request(
    page: Option<&str>,
    page_size: Option<&str>,
) -> Result<PageRequest, Error> {
    let mut validator = Validator::new();
    let page_value = read_int(page, "page", i64::from(DEFAULT_PAGE), &mut validator);
    let size_value = read_int(
        page_size,
        "page_size",
        i64::from(DEFAULT_PAGE_SIZE),
        &mut validator,
    );

    if let Some(value) = page_value {
        validator.record("page", PageRequest::check_page(value));
    }
    if let Some(value) = size_value {
        validator.record("page_size", PageRequest::check_page_size(value));
    }
    match (page_value, size_value) {
        (Some(page_number), Some(size)) if validator.is_valid() => {
            PageRequest::new(page_number, size).map_err(|_| validator.into_error())
        }
        _ => Err(validator.into_error()),
    }
}
