//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{MockReviewsCommand, MockReviewsQuery, MockUserAccountsCommand};
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::{fallback, v1_routes};

/// Clock pinned to a single instant.
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Noon UTC on 2026-10-17.
pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0)
        .single()
        .expect("fixture timestamp is unambiguous")
}

/// Clock reporting [`fixture_now`].
pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_now(),
    })
}

/// Mocks backing an [`HttpState`]; unset expectations fail the test.
#[derive(Default)]
pub struct MockPorts {
    pub reviews: MockReviewsCommand,
    pub reviews_query: MockReviewsQuery,
    pub users: MockUserAccountsCommand,
}

impl MockPorts {
    /// Freeze the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                reviews: Arc::new(self.reviews),
                reviews_query: Arc::new(self.reviews_query),
                users: Arc::new(self.users),
            },
            fixture_clock(),
        )
    }
}

/// Application exposing the `/v1` routes and fallbacks over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(HealthState::new("test")))
        .service(web::scope("/v1").configure(v1_routes))
        .default_service(web::to(fallback::not_found))
}
