//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every handler in the inbound layer (reviews, users, health)
//! - **Schemas**: domain type wrappers ([`ErrorSchema`], [`ReviewSchema`],
//!   [`UserSchema`] and friends) that provide OpenAPI definitions without
//!   coupling domain types to the utoipa framework
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{
    CreatedRecordSchema, ErrorCodeSchema, ErrorSchema, MessageResponse, MetadataSchema,
    ReviewSchema, StatementSchema, UserSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cinepulse backend API",
        description = "Movie reviews and user accounts over a versioned JSON interface.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::reviews::create_review,
        crate::inbound::http::reviews::list_reviews,
        crate::inbound::http::reviews::show_review,
        crate::inbound::http::reviews::update_review,
        crate::inbound::http::reviews::delete_review,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::health::healthcheck,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ReviewSchema,
        StatementSchema,
        CreatedRecordSchema,
        MetadataSchema,
        UserSchema,
        MessageResponse
    )),
    tags(
        (name = "reviews", description = "Movie review records"),
        (name = "users", description = "Account registration and profiles"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
