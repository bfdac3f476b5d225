//! Plan management scoped to the owning user.

use std::sync::Arc;

use crate::domain::entities::{NewPlan, Plan, PlanPatch, Visit};
use crate::domain::repositories::{PlanRepository, VisitRepository};
use crate::error::AppError;
use serde_json::json;

use super::ensure_all_found;

/// A plan with its visits, for the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDetails {
    pub plan: Plan,
    pub visits: Vec<Visit>,
}

pub struct PlanService<L: PlanRepository, V: VisitRepository> {
    plan_repository: Arc<L>,
    visit_repository: Arc<V>,
}

impl<L: PlanRepository, V: VisitRepository> PlanService<L, V> {
    pub fn new(plan_repository: Arc<L>, visit_repository: Arc<V>) -> Self {
        Self {
            plan_repository,
            visit_repository,
        }
    }

    /// Lists the caller's plans; with `visit_ids`, only plans sharing at
    /// least one of those visits, each once.
    pub async fn list(
        &self,
        owner_id: i64,
        visit_ids: Option<Vec<i64>>,
    ) -> Result<Vec<Plan>, AppError> {
        self.plan_repository.list_by_owner(owner_id, visit_ids).await
    }

    pub async fn create(&self, owner_id: i64, new_plan: NewPlan) -> Result<Plan, AppError> {
        self.check_visits(owner_id, &new_plan.visit_ids).await?;

        let plan = self.plan_repository.create(owner_id, new_plan).await?;
        tracing::info!(user_id = owner_id, plan_id = plan.id, "Plan created");
        Ok(plan)
    }

    pub async fn retrieve(&self, owner_id: i64, id: i64) -> Result<PlanDetails, AppError> {
        let plan = self.get(owner_id, id).await?;
        let visits = self
            .visit_repository
            .find_many(owner_id, &plan.visit_ids)
            .await?;

        Ok(PlanDetails { plan, visits })
    }

    pub async fn partial_update(
        &self,
        owner_id: i64,
        id: i64,
        patch: PlanPatch,
    ) -> Result<Plan, AppError> {
        self.get(owner_id, id).await?;
        if let Some(ids) = &patch.visit_ids {
            self.check_visits(owner_id, ids).await?;
        }

        let plan = self
            .plan_repository
            .update(owner_id, id, patch)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!(user_id = owner_id, plan_id = id, "Plan updated");
        Ok(plan)
    }

    pub async fn full_update(
        &self,
        owner_id: i64,
        id: i64,
        new_plan: NewPlan,
    ) -> Result<Plan, AppError> {
        self.partial_update(owner_id, id, new_plan.into()).await
    }

    pub async fn delete(&self, owner_id: i64, id: i64) -> Result<(), AppError> {
        if !self.plan_repository.delete(owner_id, id).await? {
            return Err(not_found(id));
        }

        tracing::info!(user_id = owner_id, plan_id = id, "Plan deleted");
        Ok(())
    }

    /// 404 unless the caller owns `id`. Lets handlers resolve the object
    /// before looking at the request body.
    pub async fn ensure_exists(&self, owner_id: i64, id: i64) -> Result<(), AppError> {
        self.get(owner_id, id).await.map(|_| ())
    }

    async fn get(&self, owner_id: i64, id: i64) -> Result<Plan, AppError> {
        self.plan_repository
            .find_by_id(owner_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn check_visits(&self, owner_id: i64, ids: &[i64]) -> Result<(), AppError> {
        if ids.is_empty() {
            return Ok(());
        }

        let found = self.visit_repository.find_many(owner_id, ids).await?;
        ensure_all_found("visits", ids, found.iter().map(|v| v.id))
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found("Plan not found", json!({ "id": id }))
}
