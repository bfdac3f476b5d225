//! HTTP middleware and extractors for request processing and protection.
//!
//! Provides authentication, rate limiting, and observability.

pub mod auth;
pub mod rate_limit;
pub mod tracing;

pub use auth::AuthUser;
