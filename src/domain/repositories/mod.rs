//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`CategoryRepository`] - Shared categories
//! - [`PlaceRepository`] - Owned places and their categories
//! - [`VisitRepository`] - Owned visits
//! - [`PlanRepository`] - Owned plans and their visits
//! - [`UserRepository`] - Accounts
//! - [`TokenRepository`] - API token authentication
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod category_repository;
pub mod place_repository;
pub mod plan_repository;
pub mod token_repository;
pub mod user_repository;
pub mod visit_repository;

pub use category_repository::CategoryRepository;
pub use place_repository::PlaceRepository;
pub use plan_repository::PlanRepository;
pub use token_repository::{ApiToken, TokenRepository};
pub use user_repository::UserRepository;
pub use visit_repository::VisitRepository;

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use place_repository::MockPlaceRepository;
#[cfg(test)]
pub use plan_repository::MockPlanRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use visit_repository::MockVisitRepository;
