//! PostgreSQL implementation of visit repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewVisit, Visit, VisitPatch};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

const VISIT_COLUMNS: &str = r#"id, user_id, title, place_id, "time", score, notes"#;

#[derive(FromRow)]
struct VisitRow {
    id: i64,
    user_id: i64,
    title: String,
    place_id: i64,
    time: Option<NaiveDate>,
    score: Option<Decimal>,
    notes: String,
}

impl From<VisitRow> for Visit {
    fn from(r: VisitRow) -> Self {
        Visit {
            id: r.id,
            owner_id: r.user_id,
            title: r.title,
            place_id: r.place_id,
            time: r.time,
            score: r.score,
            notes: r.notes,
        }
    }
}

/// PostgreSQL repository for visits.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn create(&self, owner_id: i64, new_visit: NewVisit) -> Result<Visit, AppError> {
        let query = format!(
            "INSERT INTO visits (user_id, title, place_id, \"time\", score, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {VISIT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, VisitRow>(&query)
            .bind(owner_id)
            .bind(&new_visit.title)
            .bind(new_visit.place_id)
            .bind(new_visit.time)
            .bind(new_visit.score)
            .bind(&new_visit.notes)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, owner_id: i64, id: i64) -> Result<Option<Visit>, AppError> {
        let query = format!("SELECT {VISIT_COLUMNS} FROM visits WHERE user_id = $1 AND id = $2");
        let row = sqlx::query_as::<_, VisitRow>(&query)
            .bind(owner_id)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_many(&self, owner_id: i64, ids: &[i64]) -> Result<Vec<Visit>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT {VISIT_COLUMNS} FROM visits \
             WHERE user_id = $1 AND id = ANY($2) \
             ORDER BY id"
        );
        let rows = sqlx::query_as::<_, VisitRow>(&query)
            .bind(owner_id)
            .bind(ids)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        place_ids: Option<Vec<i64>>,
    ) -> Result<Vec<Visit>, AppError> {
        let query = format!(
            "SELECT {VISIT_COLUMNS} FROM visits \
             WHERE user_id = $1 \
               AND ($2::BIGINT[] IS NULL OR place_id = ANY($2)) \
             ORDER BY id DESC"
        );
        let rows = sqlx::query_as::<_, VisitRow>(&query)
            .bind(owner_id)
            .bind(place_ids)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        owner_id: i64,
        id: i64,
        patch: VisitPatch,
    ) -> Result<Option<Visit>, AppError> {
        let query = format!(
            "UPDATE visits SET \
                 title    = COALESCE($3::TEXT, title), \
                 place_id = COALESCE($4::BIGINT, place_id), \
                 \"time\"   = CASE WHEN $5 THEN $6::DATE ELSE \"time\" END, \
                 score    = CASE WHEN $7 THEN $8::NUMERIC ELSE score END, \
                 notes    = COALESCE($9::TEXT, notes) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {VISIT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, VisitRow>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(patch.title)
            .bind(patch.place_id)
            .bind(patch.time.is_some())
            .bind(patch.time.flatten())
            .bind(patch.score.is_some())
            .bind(patch.score.flatten())
            .bind(patch.notes)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, owner_id: i64, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM plan_visits \
             WHERE visit_id = (SELECT id FROM visits WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM visits WHERE id = $1 AND user_id = $2")
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
