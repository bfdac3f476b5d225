//! Repository trait for visits.

use crate::domain::entities::{NewVisit, Visit, VisitPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for visits, scoped by owner like
/// [`super::PlaceRepository`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Inserts a visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, owner_id: i64, new_visit: NewVisit) -> Result<Visit, AppError>;

    /// Finds one of the owner's visits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, owner_id: i64, id: i64) -> Result<Option<Visit>, AppError>;

    /// Fetches the owner's visits among `ids`, ordered by id.
    ///
    /// Ids that are unknown or belong to another account are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_many(&self, owner_id: i64, ids: &[i64]) -> Result<Vec<Visit>, AppError>;

    /// Lists the owner's visits, newest id first.
    ///
    /// With `place_ids`, only visits to one of those places are returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_owner(
        &self,
        owner_id: i64,
        place_ids: Option<Vec<i64>>,
    ) -> Result<Vec<Visit>, AppError>;

    /// Applies a patch to one of the owner's visits.
    ///
    /// Returns `None` if the visit does not exist for this owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(
        &self,
        owner_id: i64,
        id: i64,
        patch: VisitPatch,
    ) -> Result<Option<Visit>, AppError>;

    /// Deletes one of the owner's visits and detaches it from plans.
    ///
    /// Returns `false` if the visit does not exist for this owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, owner_id: i64, id: i64) -> Result<bool, AppError>;
}
