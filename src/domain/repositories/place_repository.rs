//! Repository trait for places.

use crate::domain::entities::{NewPlace, Place, PlacePatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for places.
///
/// Every method is scoped by `owner_id`: rows of other accounts behave as
/// if they did not exist.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPlaceRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_place.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Inserts a place with its category links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, owner_id: i64, new_place: NewPlace) -> Result<Place, AppError>;

    /// Finds one of the owner's places.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, owner_id: i64, id: i64) -> Result<Option<Place>, AppError>;

    /// Lists the owner's places, newest id first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Place>, AppError>;

    /// Applies a patch to one of the owner's places.
    ///
    /// Returns `None` if the place does not exist for this owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(
        &self,
        owner_id: i64,
        id: i64,
        patch: PlacePatch,
    ) -> Result<Option<Place>, AppError>;

    /// Deletes one of the owner's places together with its visits.
    ///
    /// Visits are first detached from any plan; the plans themselves stay.
    /// Returns `false` if the place does not exist for this owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, owner_id: i64, id: i64) -> Result<bool, AppError>;
}
