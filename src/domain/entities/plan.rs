//! Plan entity and its write models.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A dated, budgeted bundle of visits.
///
/// `begins` and `ends` are not ordered against each other. `visit_ids`
/// is kept in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub begins: NaiveDate,
    pub ends: NaiveDate,
    pub budget: Decimal,
    pub done: bool,
    pub visit_ids: Vec<i64>,
}

/// Complete field set for a plan, used for create and full replace.
#[derive(Debug, Clone)]
pub struct NewPlan {
    pub name: String,
    pub begins: NaiveDate,
    pub ends: NaiveDate,
    pub budget: Decimal,
    pub done: bool,
    pub visit_ids: Vec<i64>,
}

/// Partial update for an existing plan.
///
/// `visit_ids: Some(ids)` replaces the whole visit set.
#[derive(Debug, Clone, Default)]
pub struct PlanPatch {
    pub name: Option<String>,
    pub begins: Option<NaiveDate>,
    pub ends: Option<NaiveDate>,
    pub budget: Option<Decimal>,
    pub done: Option<bool>,
    pub visit_ids: Option<Vec<i64>>,
}

impl From<NewPlan> for PlanPatch {
    fn from(p: NewPlan) -> Self {
        Self {
            name: Some(p.name),
            begins: Some(p.begins),
            ends: Some(p.ends),
            budget: Some(p.budget),
            done: Some(p.done),
            visit_ids: Some(p.visit_ids),
        }
    }
}
