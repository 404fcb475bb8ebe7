//! Responses for requests that match no route or no method.

use actix_web::{HttpRequest, HttpResponse};

use crate::domain::{ApiResult, Error, NOT_FOUND_MESSAGE};

/// Default service for unknown paths.
pub async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found(NOT_FOUND_MESSAGE))
}

/// Default service for known paths reached with an unsupported method.
///
/// The body reuses the standard error shape; the status is 405.
pub async fn method_not_allowed(req: HttpRequest) -> HttpResponse {
    let error = Error::invalid_request(format!(
        "the {} method is not supported for this resource",
        req.method()
    ));
    HttpResponse::MethodNotAllowed().json(error)
}
