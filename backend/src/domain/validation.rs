//! Field-level validation accumulator.
//!
//! Request decoding collects every failing field before responding so a
//! client can fix all problems in one round trip. Only the first message
//! recorded for a field is kept.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use super::Error;

/// Message used for every validation failure response.
pub const FAILED_VALIDATION_MESSAGE: &str = "failed validation";

/// Collects field errors keyed by field name.
///
/// # Examples
/// ```
/// use cinepulse::domain::Validator;
///
/// let mut validator = Validator::new();
/// validator.check(false, "rating", "must be greater than zero");
/// validator.check(false, "rating", "must be at most equal to 5");
/// assert_eq!(validator.errors().get("rating").map(String::as_str), Some("must be greater than zero"));
/// assert!(validator.finish().is_err());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Validator {
    errors: BTreeMap<String, String>,
}

impl Validator {
    /// Create an empty validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless the field already has one.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_insert_with(|| message.into());
    }

    /// Record `message` for `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add_error(field, message);
        }
    }

    /// Unwrap a field parse result, recording its error under `field`.
    pub fn record<T, E>(&mut self, field: &str, result: Result<T, E>) -> Option<T>
    where
        E: fmt::Display,
    {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.add_error(field, err.to_string());
                None
            }
        }
    }

    /// True when no field has failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Recorded messages keyed by field.
    #[must_use]
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Convert the accumulated state into a result.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorCode::UnprocessableEntity`](super::ErrorCode) error
    /// whose details map each failing field to its message.
    pub fn finish(self) -> Result<(), Error> {
        if self.is_valid() {
            return Ok(());
        }
        Err(self.into_error())
    }

    /// Build the validation error regardless of state.
    #[must_use]
    pub fn into_error(self) -> Error {
        let fields: Map<String, Value> = self
            .errors
            .into_iter()
            .map(|(field, message)| (field, Value::String(message)))
            .collect();
        Error::unprocessable_entity(FAILED_VALIDATION_MESSAGE).with_details(Value::Object(fields))
    }
}

/// Build a single-field validation error.
pub fn field_error(field: &str, message: impl Into<String>) -> Error {
    let mut validator = Validator::new();
    validator.add_error(field, message);
    validator.into_error()
}
