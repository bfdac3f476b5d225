//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health` - Database health check (public)
//! - `/api/*`      - Travel resources (see [`crate::api::routes`])
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api`
//! - **Path normalization** - Trailing slash trimmed before routing

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes and state without rate limiting, tracing or path normalization.
///
/// Used directly by integration tests, where requests carry no peer address.
pub fn base_router(state: AppState) -> Router {
    compose(state, api::routes::travel_routes())
}

fn compose(state: AppState, api_router: Router<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   forwarding headers instead of the peer socket address; enable only
///   when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let api_router = rate_limit::apply(api::routes::travel_routes(), behind_proxy);
    let router = compose(state, api_router).layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
