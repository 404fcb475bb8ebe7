//! Builders wiring repository-backed services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use cinepulse::domain::{ReviewService, UserAccountService};
use cinepulse::inbound::http::state::{HttpState, HttpStatePorts};
use cinepulse::outbound::password::BcryptPasswordHasher;
use cinepulse::outbound::persistence::{DieselReviewRepository, DieselUserRepository};

use super::ServerConfig;

/// Build handler state over the Diesel repositories in `config`.
///
/// One review service answers both the command and query ports.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let review_repo = DieselReviewRepository::new(config.db_pool.clone())
        .with_query_timeout(config.query_timeout);
    let user_repo = DieselUserRepository::new(config.db_pool.clone())
        .with_query_timeout(config.query_timeout);

    let reviews = Arc::new(ReviewService::new(Arc::new(review_repo)));
    let users = Arc::new(UserAccountService::new(
        Arc::new(user_repo),
        Arc::new(BcryptPasswordHasher::new(config.bcrypt_cost)),
    ));

    web::Data::new(HttpState::new(
        HttpStatePorts {
            reviews: reviews.clone(),
            reviews_query: reviews,
            users,
        },
        Arc::new(DefaultClock),
    ))
}
