//! DTOs for plan endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use super::fields;
use super::visit::{self, VisitReference};
use crate::domain::entities::{NewPlan, Plan, PlanPatch, Visit};
use crate::error::AppError;
use crate::utils::decimal::BUDGET;

/// Request body for plan create, full and partial update.
///
/// No field is nullable. `begins` may come after `ends`; ordering is not
/// enforced.
#[derive(Debug, Default, Deserialize)]
pub struct PlanRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub begins: Option<Option<NaiveDate>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub ends: Option<Option<NaiveDate>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub budget: Option<Option<Decimal>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub done: Option<Option<bool>>,

    /// Ids of visits owned by the caller.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub visits: Option<Option<Vec<i64>>>,
}

impl PlanRequest {
    fn field_errors(&mut self) -> ValidationErrors {
        fields::trim(&mut self.name);

        let mut errors = ValidationErrors::new();
        fields::check_text(&mut errors, "name", fields::text(&self.name), 255, false);
        fields::check_decimal(&mut errors, "budget", self.budget.flatten().as_ref(), BUDGET);
        errors
    }

    pub fn into_new_plan(mut self) -> Result<NewPlan, AppError> {
        let mut errors = self.field_errors();
        let name = fields::required(&mut errors, "name", self.name);
        let begins = fields::required(&mut errors, "begins", self.begins);
        let ends = fields::required(&mut errors, "ends", self.ends);
        let budget = fields::required(&mut errors, "budget", self.budget);
        let done = fields::non_null(&mut errors, "done", self.done);
        let visit_ids = fields::non_null(&mut errors, "visits", self.visits);

        match (name, begins, ends, budget) {
            (Some(name), Some(begins), Some(ends), Some(budget)) if errors.is_empty() => {
                Ok(NewPlan {
                    name,
                    begins,
                    ends,
                    budget,
                    done: done.unwrap_or(false),
                    visit_ids: visit_ids.unwrap_or_default(),
                })
            }
            _ => Err(errors.into()),
        }
    }

    pub fn into_patch(mut self) -> Result<PlanPatch, AppError> {
        let mut errors = self.field_errors();
        let patch = PlanPatch {
            name: fields::non_null(&mut errors, "name", self.name),
            begins: fields::non_null(&mut errors, "begins", self.begins),
            ends: fields::non_null(&mut errors, "ends", self.ends),
            budget: fields::non_null(&mut errors, "budget", self.budget),
            done: fields::non_null(&mut errors, "done", self.done),
            visit_ids: fields::non_null(&mut errors, "visits", self.visits),
        };

        fields::finish(errors)?;
        Ok(patch)
    }
}

/// Plan with visit ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanReference {
    pub id: i64,
    pub name: String,
    pub begins: NaiveDate,
    pub ends: NaiveDate,
    pub budget: Decimal,
    pub done: bool,
    pub visits: Vec<i64>,
}

/// Plan with its visits in reference form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanDetail {
    pub id: i64,
    pub name: String,
    pub begins: NaiveDate,
    pub ends: NaiveDate,
    pub budget: Decimal,
    pub done: bool,
    pub visits: Vec<VisitReference>,
}

pub fn to_reference(plan: Plan) -> PlanReference {
    PlanReference {
        id: plan.id,
        name: plan.name,
        begins: plan.begins,
        ends: plan.ends,
        budget: plan.budget,
        done: plan.done,
        visits: plan.visit_ids,
    }
}

pub fn to_detail(plan: Plan, visits: Vec<Visit>) -> PlanDetail {
    PlanDetail {
        id: plan.id,
        name: plan.name,
        begins: plan.begins,
        ends: plan.ends,
        budget: plan.budget,
        done: plan.done,
        visits: visits.into_iter().map(visit::to_reference).collect(),
    }
}
