//! Shared category catalogue.

use std::sync::Arc;

use crate::domain::entities::{Category, NewCategory};
use crate::domain::repositories::CategoryRepository;
use crate::error::AppError;
use serde_json::json;

pub const DUPLICATE_NAME: &str = "category with this name already exists.";

/// Categories are global: any identity can read and add them, deletion is
/// an operator task.
pub struct CategoryService<C: CategoryRepository> {
    repository: Arc<C>,
}

impl<C: CategoryRepository> CategoryService<C> {
    pub fn new(repository: Arc<C>) -> Self {
        Self { repository }
    }

    /// All categories, name descending.
    pub async fn list(&self) -> Result<Vec<Category>, AppError> {
        self.repository.list().await
    }

    /// Creates a category with a unique name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on `name` if the name is taken. A
    /// concurrent insert that slips past the check is caught by the unique
    /// constraint and reported the same way.
    pub async fn create(&self, new_category: NewCategory) -> Result<Category, AppError> {
        if self
            .repository
            .find_by_name(&new_category.name)
            .await?
            .is_some()
        {
            return Err(AppError::field("name", DUPLICATE_NAME));
        }

        let category = self.repository.create(new_category).await?;
        tracing::info!(category_id = category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Deletes a category by name, detaching it from every place.
    pub async fn delete_by_name(&self, name: &str) -> Result<Category, AppError> {
        let category = self
            .repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found", json!({ "name": name })))?;

        if !self.repository.delete(category.id).await? {
            return Err(AppError::not_found(
                "Category not found",
                json!({ "name": name }),
            ));
        }

        tracing::info!(category_id = category.id, "Category deleted");
        Ok(category)
    }
}
