//! Rate limiting middleware using token bucket algorithm.
//!
//! Limits apply per client IP. Behind a trusted reverse proxy the address
//! comes from `X-Forwarded-For` / `X-Real-IP` / `Forwarded`; otherwise from
//! the socket peer, which requires serving with
//! `into_make_service_with_connect_info::<SocketAddr>()`.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Sustained requests per second per client.
const PER_SECOND: u64 = 5;
/// Requests a client may issue in a burst.
const BURST_SIZE: u32 = 100;

type Layer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

fn build<K: KeyExtractor>(key_extractor: K) -> Layer<K> {
    let config: GovernorConfig<K, NoOpMiddleware<QuantaInstant>> = GovernorConfigBuilder::default()
        .per_second(PER_SECOND)
        .burst_size(BURST_SIZE)
        .key_extractor(key_extractor)
        .finish()
        .expect("rate limit quota is non-zero");

    GovernorLayer::new(Arc::new(config))
}

/// Limiter keyed by the socket peer address.
pub fn layer() -> Layer<PeerIpKeyExtractor> {
    build(PeerIpKeyExtractor)
}

/// Limiter keyed by forwarding headers, falling back to the peer address.
pub fn proxy_layer() -> Layer<SmartIpKeyExtractor> {
    build(SmartIpKeyExtractor)
}

/// Applies the limiter matching the deployment to `router`.
///
/// Requests over the limit receive `429 Too Many Requests`.
pub fn apply<S>(router: Router<S>, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        router.layer(proxy_layer())
    } else {
        router.layer(layer())
    }
}
