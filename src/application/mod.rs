//! Application layer services implementing business logic.
//!
//! Services consume repository traits, enforce ownership and relation
//! rules, and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::CategoryService`] - Shared categories
//! - [`services::PlaceService`] - Places and their categories
//! - [`services::VisitService`] - Visits and the `places` filter
//! - [`services::PlanService`] - Plans and the `visits` filter
//! - [`services::AuthService`] - API token authentication and issuance
//! - [`services::UserService`] - Accounts

pub mod services;
