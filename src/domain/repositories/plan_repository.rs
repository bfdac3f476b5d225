//! Repository trait for plans.

use crate::domain::entities::{NewPlan, Plan, PlanPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for plans, scoped by owner like
/// [`super::PlaceRepository`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Inserts a plan with its visit links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, owner_id: i64, new_plan: NewPlan) -> Result<Plan, AppError>;

    /// Finds one of the owner's plans.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, owner_id: i64, id: i64) -> Result<Option<Plan>, AppError>;

    /// Lists the owner's plans, newest id first.
    ///
    /// With `visit_ids`, only plans containing at least one of those visits
    /// are returned, each once.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_owner(
        &self,
        owner_id: i64,
        visit_ids: Option<Vec<i64>>,
    ) -> Result<Vec<Plan>, AppError>;

    /// Applies a patch to one of the owner's plans.
    ///
    /// Returns `None` if the plan does not exist for this owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(
        &self,
        owner_id: i64,
        id: i64,
        patch: PlanPatch,
    ) -> Result<Option<Plan>, AppError>;

    /// Deletes one of the owner's plans. Its visits are kept.
    ///
    /// Returns `false` if the plan does not exist for this owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, owner_id: i64, id: i64) -> Result<bool, AppError>;
}
