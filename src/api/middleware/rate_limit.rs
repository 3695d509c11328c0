//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Per-IP rate limiter layer for `/api` routes.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter allowing `requests_per_second` sustained requests
/// with bursts of up to `burst` requests.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Errors
///
/// Returns an error when either value is zero.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .nest("/api", api_routes())
///     .layer(rate_limit::layer(10, 50)?);
/// ```
pub fn layer(requests_per_second: u32, burst: u32) -> Result<RateLimitLayer> {
    if requests_per_second == 0 {
        anyhow::bail!("rate limit must allow at least one request per second");
    }
    let replenish_ms = (1000 / u64::from(requests_per_second)).max(1);

    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(replenish_ms)
        .burst_size(burst)
        .finish()
        .context("Invalid rate limit configuration")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_limits() {
        assert!(layer(10, 50).is_ok());
        assert!(layer(5000, 1).is_ok());
    }

    #[test]
    fn test_zero_limits_rejected() {
        assert!(layer(0, 50).is_err());
        assert!(layer(10, 0).is_err());
    }
}
