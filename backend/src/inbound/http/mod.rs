//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod fallback;
pub mod health;
pub mod json;
pub mod reviews;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use crate::domain::ApiResult;

/// Register the versioned API on a scope mounted at `/v1`.
///
/// Each path is a single resource so a known path reached with another
/// method answers 405 instead of falling through to 404.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use cinepulse::inbound::http::v1_routes;
///
/// let app = App::new().service(web::scope("/v1").configure(v1_routes));
/// ```
pub fn v1_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health::healthcheck)
        .service(
            web::resource("/reviews")
                .route(web::get().to(reviews::list_reviews))
                .route(web::post().to(reviews::create_review))
                .default_service(web::to(fallback::method_not_allowed)),
        )
        .service(
            web::resource("/reviews/{id}")
                .route(web::get().to(reviews::show_review))
                .route(web::patch().to(reviews::update_review))
                .route(web::delete().to(reviews::delete_review))
                .default_service(web::to(fallback::method_not_allowed)),
        )
        .service(
            web::resource("/users")
                .route(web::post().to(users::register_user))
                .default_service(web::to(fallback::method_not_allowed)),
        )
        .service(
            web::resource("/users/{id}")
                .route(web::patch().to(users::update_user))
                .default_service(web::to(fallback::method_not_allowed)),
        );
}
