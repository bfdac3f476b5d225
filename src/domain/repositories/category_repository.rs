//! Repository trait for categories.

use crate::domain::entities::{Category, NewCategory};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for globally shared categories.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCategoryRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Creates a new category.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_category: NewCategory) -> Result<Category, AppError>;

    /// Finds a category by its exact name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError>;

    /// Fetches the categories with the given ids, ordered by id.
    ///
    /// Unknown ids are skipped, so callers compare lengths to detect them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_many(&self, ids: &[i64]) -> Result<Vec<Category>, AppError>;

    /// Lists all categories ordered by name descending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<Category>, AppError>;

    /// Deletes a category and detaches it from every place.
    ///
    /// Returns `false` if no category has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
