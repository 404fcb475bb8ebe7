//! Per-client request throttling.
//!
//! Clients are keyed by peer IP and refilled at a steady rate with a burst
//! allowance. Requests over the limit are answered with `429 Too Many
//! Requests` before reaching any handler.
//!
//! Build one [`RateLimit`] outside the `HttpServer` factory closure and clone
//! it into each worker so all workers draw from the same buckets.

use actix_governor::governor::middleware::NoOpMiddleware;
use actix_governor::{Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};
use actix_web::middleware::Condition;

/// Requests per second replenished for each client.
pub const DEFAULT_LIMITER_RPS: u32 = 2;
/// Requests a client may send back to back before throttling starts.
pub const DEFAULT_LIMITER_BURST: u32 = 5;

/// Raised when the limiter cannot be built from the supplied rates.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
#[error("rate limiter needs a non-zero rate and burst (rps={rps}, burst={burst})")]
pub struct RateLimitError {
    rps: u32,
    burst: u32,
}

/// Shared limiter configuration, toggled on or off as a whole.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use cinepulse::middleware::RateLimit;
///
/// let limit = RateLimit::new(2, 5, true).expect("valid limits");
/// let _app = App::new().wrap(limit.middleware());
/// ```
#[derive(Clone)]
pub struct RateLimit {
    enabled: bool,
    rps: u32,
    burst: u32,
    config: GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>,
}

impl RateLimit {
    /// Build a limiter allowing `rps` requests per second per client with a
    /// burst of `burst`.
    ///
    /// # Errors
    /// Returns [`RateLimitError`] when either value is zero.
    pub fn new(rps: u32, burst: u32, enabled: bool) -> Result<Self, RateLimitError> {
        let err = RateLimitError { rps, burst };
        if rps == 0 || burst == 0 {
            return Err(err);
        }
        let config = GovernorConfigBuilder::default()
            .requests_per_second(u64::from(rps))
            .burst_size(burst)
            .finish()
            .ok_or(err)?;
        Ok(Self {
            enabled,
            rps,
            burst,
            config,
        })
    }

    /// Whether requests are throttled at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn rps(&self) -> u32 {
        self.rps
    }

    pub fn burst(&self) -> u32 {
        self.burst
    }

    /// Middleware enforcing the limit, or passing requests through when
    /// disabled.
    pub fn middleware(&self) -> Condition<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
        Condition::new(self.enabled, Governor::new(&self.config))
    }
}

impl std::fmt::Debug for RateLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimit")
            .field("enabled", &self.enabled)
            .field("rps", &self.rps)
            .field("burst", &self.burst)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    //! Throttling behaviour over a minimal app.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, web};
    use rstest::rstest;
    use std::net::SocketAddr;

    fn peer(port: u16) -> SocketAddr {
        SocketAddr::from(([192, 0, 2, 10], port))
    }

    macro_rules! status_for {
        ($app:expr, $addr:expr) => {{
            let req = actix_test::TestRequest::get()
                .uri("/")
                .peer_addr($addr)
                .to_request();
            match actix_test::try_call_service($app, req).await {
                Ok(res) => res.status(),
                Err(err) => err.error_response().status(),
            }
        }};
    }

    #[rstest]
    #[case(0, 5)]
    #[case(2, 0)]
    fn zero_rates_are_rejected(#[case] rps: u32, #[case] burst: u32) {
        let err = RateLimit::new(rps, burst, true).expect_err("zero rate");
        assert!(err.to_string().contains("non-zero"));
    }

    #[rstest]
    fn defaults_build() {
        let limit = RateLimit::new(DEFAULT_LIMITER_RPS, DEFAULT_LIMITER_BURST, true)
            .expect("default limits");
        assert!(limit.is_enabled());
        assert_eq!((limit.rps(), limit.burst()), (2, 5));
    }

    #[rstest]
    #[actix_web::test]
    async fn requests_past_the_burst_are_throttled() {
        let limit = RateLimit::new(1, 2, true).expect("limits");
        let app = actix_test::init_service(
            App::new()
                .wrap(limit.middleware())
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        assert_eq!(status_for!(&app, peer(40_000)), StatusCode::OK);
        assert_eq!(status_for!(&app, peer(40_001)), StatusCode::OK);
        assert_eq!(
            status_for!(&app, peer(40_002)),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn clients_are_throttled_independently() {
        let limit = RateLimit::new(1, 1, true).expect("limits");
        let app = actix_test::init_service(
            App::new()
                .wrap(limit.middleware())
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let other = SocketAddr::from(([198, 51, 100, 7], 40_000));

        assert_eq!(status_for!(&app, peer(40_000)), StatusCode::OK);
        assert_eq!(
            status_for!(&app, peer(40_000)),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(status_for!(&app, other), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn disabled_limiter_passes_everything() {
        let limit = RateLimit::new(1, 1, false).expect("limits");
        let app = actix_test::init_service(
            App::new()
                .wrap(limit.middleware())
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        for _ in 0..5 {
            assert_eq!(status_for!(&app, peer(40_000)), StatusCode::OK);
        }
    }
}
