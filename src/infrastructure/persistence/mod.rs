//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgCategoryRepository`] - Shared categories
//! - [`PgPlaceRepository`] - Places and their category links
//! - [`PgVisitRepository`] - Visits
//! - [`PgPlanRepository`] - Plans and their visit links
//! - [`PgUserRepository`] - Accounts
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_category_repository;
pub mod pg_place_repository;
pub mod pg_plan_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;
pub mod pg_visit_repository;

pub use pg_category_repository::PgCategoryRepository;
pub use pg_place_repository::PgPlaceRepository;
pub use pg_plan_repository::PgPlanRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
pub use pg_visit_repository::PgVisitRepository;
