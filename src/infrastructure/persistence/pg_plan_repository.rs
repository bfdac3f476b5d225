//! PostgreSQL implementation of plan repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::{FromRow, PgConnection, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewPlan, Plan, PlanPatch};
use crate::domain::repositories::PlanRepository;
use crate::error::AppError;

/// Plan columns plus the aggregated, ordered visit ids.
///
/// Queries append their `WHERE` clause followed by `GROUP BY pl.id`.
const PLAN_SELECT: &str = "\
    SELECT pl.id, pl.user_id, pl.name, pl.begins, pl.ends, pl.budget, pl.done, \
           COALESCE( \
               ARRAY_AGG(pv.visit_id ORDER BY pv.visit_id) \
                   FILTER (WHERE pv.visit_id IS NOT NULL), \
               '{}' \
           ) AS visit_ids \
    FROM plans pl \
    LEFT JOIN plan_visits pv ON pv.plan_id = pl.id";

#[derive(FromRow)]
struct PlanRow {
    id: i64,
    user_id: i64,
    name: String,
    begins: NaiveDate,
    ends: NaiveDate,
    budget: Decimal,
    done: bool,
    visit_ids: Vec<i64>,
}

impl From<PlanRow> for Plan {
    fn from(r: PlanRow) -> Self {
        Plan {
            id: r.id,
            owner_id: r.user_id,
            name: r.name,
            begins: r.begins,
            ends: r.ends,
            budget: r.budget,
            done: r.done,
            visit_ids: r.visit_ids,
        }
    }
}

/// PostgreSQL repository for plans and their visit links.
pub struct PgPlanRepository {
    pool: Arc<PgPool>,
}

impl PgPlanRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn fetch_existing(&self, owner_id: i64, id: i64) -> Result<Plan, AppError> {
        self.find_by_id(owner_id, id).await?.ok_or_else(|| {
            AppError::internal("Plan vanished after write", json!({ "id": id }))
        })
    }
}

async fn replace_visits(
    conn: &mut PgConnection,
    plan_id: i64,
    visit_ids: &[i64],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM plan_visits WHERE plan_id = $1")
        .bind(plan_id)
        .execute(&mut *conn)
        .await?;

    if !visit_ids.is_empty() {
        sqlx::query(
            "INSERT INTO plan_visits (plan_id, visit_id) \
             SELECT $1, UNNEST($2::BIGINT[]) \
             ON CONFLICT DO NOTHING",
        )
        .bind(plan_id)
        .bind(visit_ids)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

#[async_trait]
impl PlanRepository for PgPlanRepository {
    async fn create(&self, owner_id: i64, new_plan: NewPlan) -> Result<Plan, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO plans (user_id, name, begins, ends, budget, done)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(owner_id)
        .bind(&new_plan.name)
        .bind(new_plan.begins)
        .bind(new_plan.ends)
        .bind(new_plan.budget)
        .bind(new_plan.done)
        .fetch_one(&mut *tx)
        .await?;

        replace_visits(&mut tx, id, &new_plan.visit_ids).await?;

        tx.commit().await?;

        self.fetch_existing(owner_id, id).await
    }

    async fn find_by_id(&self, owner_id: i64, id: i64) -> Result<Option<Plan>, AppError> {
        let query = format!("{PLAN_SELECT} WHERE pl.user_id = $1 AND pl.id = $2 GROUP BY pl.id");
        let row = sqlx::query_as::<_, PlanRow>(&query)
            .bind(owner_id)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        visit_ids: Option<Vec<i64>>,
    ) -> Result<Vec<Plan>, AppError> {
        // EXISTS keeps one row per plan even when several filter ids match.
        let query = format!(
            "{PLAN_SELECT} \
             WHERE pl.user_id = $1 \
               AND ($2::BIGINT[] IS NULL OR EXISTS ( \
                   SELECT 1 FROM plan_visits f \
                   WHERE f.plan_id = pl.id AND f.visit_id = ANY($2) \
               )) \
             GROUP BY pl.id \
             ORDER BY pl.id DESC"
        );
        let rows = sqlx::query_as::<_, PlanRow>(&query)
            .bind(owner_id)
            .bind(visit_ids)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        owner_id: i64,
        id: i64,
        patch: PlanPatch,
    ) -> Result<Option<Plan>, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE plans SET
                name   = COALESCE($3::TEXT, name),
                begins = COALESCE($4::DATE, begins),
                ends   = COALESCE($5::DATE, ends),
                budget = COALESCE($6::NUMERIC, budget),
                done   = COALESCE($7::BOOLEAN, done)
            WHERE id = $1 AND user_id = $2
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(patch.name)
        .bind(patch.begins)
        .bind(patch.ends)
        .bind(patch.budget)
        .bind(patch.done)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        if let Some(visit_ids) = &patch.visit_ids {
            replace_visits(&mut tx, id, visit_ids).await?;
        }

        tx.commit().await?;

        self.fetch_existing(owner_id, id).await.map(Some)
    }

    async fn delete(&self, owner_id: i64, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM plan_visits \
             WHERE plan_id = (SELECT id FROM plans WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM plans WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }
}
