//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and per-client throttling.

pub mod rate_limit;
pub mod trace;

pub use rate_limit::{DEFAULT_LIMITER_BURST, DEFAULT_LIMITER_RPS, RateLimit, RateLimitError};
pub use trace::Trace;
