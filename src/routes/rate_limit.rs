use std::time::Duration;

use axum::Router;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};
use tracing::{info, warn};

use crate::config::ServerConfig;

/// At or above this rate the limiter is not installed (load testing)
pub const RATE_LIMIT_DISABLED_AT: u32 = 100_000;

/// Interval after which one more request is allowed for a client sending at
/// `requests_per_second`
pub fn replenish_period(requests_per_second: u32) -> Duration {
    Duration::from_secs(1) / requests_per_second.max(1)
}

/// Wrap `router` in a per-IP rate limiter.
///
/// Clients are keyed by `X-Forwarded-For`, `X-Real-IP` or `Forwarded`, falling
/// back to the peer address. Each client may send `rate_limit_burst_size`
/// requests at once, refilled at `rate_limit_requests_per_second`.
pub fn apply_rate_limit(router: Router, config: &ServerConfig) -> Router {
    let rps = config.rate_limit_requests_per_second;
    if rps >= RATE_LIMIT_DISABLED_AT {
        info!("Rate limiting disabled (rate >= {RATE_LIMIT_DISABLED_AT}/s)");
        return router;
    }

    let Some(governor_config) = GovernorConfigBuilder::default()
        .period(replenish_period(rps))
        .burst_size(config.rate_limit_burst_size)
        .key_extractor(SmartIpKeyExtractor)
        .finish()
    else {
        warn!(
            rps,
            burst = config.rate_limit_burst_size,
            "Invalid rate limit settings, rate limiting disabled"
        );
        return router;
    };

    info!(rps, burst = config.rate_limit_burst_size, "Rate limiting enabled");
    router.layer(GovernorLayer::new(governor_config))
}
