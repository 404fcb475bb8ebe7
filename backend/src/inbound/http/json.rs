//! Bounded JSON request body decoding.
//!
//! Handlers take the raw [`web::Payload`] and pass it through [`read_json`]
//! so every endpoint reports malformed bodies with the same client-facing
//! messages. Bodies are capped at [`MAX_BODY_BYTES`], must contain exactly
//! one JSON value, and DTOs reject unknown fields via
//! `#[serde(deny_unknown_fields)]`.

use actix_web::web;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::debug;

use crate::domain::Error;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 2048;

const EMPTY_BODY: &str = "body must not be empty";
const BADLY_FORMED: &str = "body contains badly-formed JSON";
const MULTIPLE_VALUES: &str = "body must contain a single JSON value";

fn too_large() -> Error {
    Error::invalid_request(format!(
        "body must not be larger than {MAX_BODY_BYTES} bytes"
    ))
}

/// Drain `payload` and decode it as a single `T`.
///
/// # Errors
///
/// Returns [`crate::domain::ErrorCode::InvalidRequest`] for oversized,
/// empty, or malformed bodies.
pub async fn read_json<T>(mut payload: web::Payload) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let mut body = Vec::new();
    while let Some(chunk) = payload.next().await {
        let bytes = chunk.map_err(|err| {
            debug!(error = %err, "request body stream failed");
            Error::invalid_request(BADLY_FORMED)
        })?;
        if body.len().saturating_add(bytes.len()) > MAX_BODY_BYTES {
            return Err(too_large());
        }
        body.extend_from_slice(&bytes);
    }
    decode_json(&body)
}

/// Decode a buffered body as a single `T`.
///
/// # Errors
///
/// Returns [`crate::domain::ErrorCode::InvalidRequest`] with one of the
/// body messages described at module level.
///
/// # Examples
/// ```
/// use cinepulse::inbound::http::json::decode_json;
///
/// let err = decode_json::<serde_json::Value>(b"{} {}").expect_err("two values");
/// assert_eq!(err.message(), "body must contain a single JSON value");
/// ```
pub fn decode_json<T>(body: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    if body.len() > MAX_BODY_BYTES {
        return Err(too_large());
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::invalid_request(EMPTY_BODY));
    }

    let mut values = serde_json::Deserializer::from_slice(body).into_iter::<T>();
    let value = match values.next() {
        Some(Ok(value)) => value,
        Some(Err(err)) => return Err(classify(&err)),
        None => return Err(Error::invalid_request(EMPTY_BODY)),
    };

    let rest = body.get(values.byte_offset()..).unwrap_or_default();
    if !rest.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::invalid_request(MULTIPLE_VALUES));
    }
    Ok(value)
}

fn classify(err: &serde_json::Error) -> Error {
    let message = match err.classify() {
        Category::Eof | Category::Io => BADLY_FORMED.to_owned(),
        Category::Syntax => format!(
            "{BADLY_FORMED} (at line {} column {})",
            err.line(),
            err.column()
        ),
        Category::Data => unknown_field(&err.to_string()).map_or_else(
            || {
                format!(
                    "body contains incorrect JSON type (at line {} column {})",
                    err.line(),
                    err.column()
                )
            },
            |field| format!("body contains unknown field \"{field}\""),
        ),
    };
    Error::invalid_request(message)
}

/// Pull the field name out of serde's "unknown field `x`, expected ..." text.
fn unknown_field(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("unknown field `")?;
    rest.split('`').next()
}
