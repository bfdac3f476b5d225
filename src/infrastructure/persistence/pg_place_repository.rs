//! PostgreSQL implementation of place repository.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::{FromRow, PgConnection, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewPlace, Place, PlacePatch};
use crate::domain::repositories::PlaceRepository;
use crate::error::AppError;

/// Place columns plus the aggregated, ordered category ids.
///
/// Queries append their `WHERE` clause followed by `GROUP BY p.id`.
const PLACE_SELECT: &str = "\
    SELECT p.id, p.user_id, p.name, p.latitude, p.longitude, p.avg_score, \
           p.notes, p.external_source, \
           COALESCE( \
               ARRAY_AGG(pc.category_id ORDER BY pc.category_id) \
                   FILTER (WHERE pc.category_id IS NOT NULL), \
               '{}' \
           ) AS category_ids \
    FROM places p \
    LEFT JOIN place_categories pc ON pc.place_id = p.id";

#[derive(FromRow)]
struct PlaceRow {
    id: i64,
    user_id: i64,
    name: String,
    latitude: Option<Decimal>,
    longitude: Option<Decimal>,
    avg_score: Option<Decimal>,
    notes: String,
    external_source: String,
    category_ids: Vec<i64>,
}

impl From<PlaceRow> for Place {
    fn from(r: PlaceRow) -> Self {
        Place {
            id: r.id,
            owner_id: r.user_id,
            name: r.name,
            latitude: r.latitude,
            longitude: r.longitude,
            avg_score: r.avg_score,
            notes: r.notes,
            external_source: r.external_source,
            category_ids: r.category_ids,
        }
    }
}

/// PostgreSQL repository for places and their category links.
///
/// Writes touching `place_categories` run in the same transaction as the
/// place row.
pub struct PgPlaceRepository {
    pool: Arc<PgPool>,
}

impl PgPlaceRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn fetch_existing(&self, owner_id: i64, id: i64) -> Result<Place, AppError> {
        self.find_by_id(owner_id, id).await?.ok_or_else(|| {
            AppError::internal("Place vanished after write", json!({ "id": id }))
        })
    }
}

async fn replace_categories(
    conn: &mut PgConnection,
    place_id: i64,
    category_ids: &[i64],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM place_categories WHERE place_id = $1")
        .bind(place_id)
        .execute(&mut *conn)
        .await?;

    if !category_ids.is_empty() {
        sqlx::query(
            "INSERT INTO place_categories (place_id, category_id) \
             SELECT $1, UNNEST($2::BIGINT[]) \
             ON CONFLICT DO NOTHING",
        )
        .bind(place_id)
        .bind(category_ids)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

#[async_trait]
impl PlaceRepository for PgPlaceRepository {
    async fn create(&self, owner_id: i64, new_place: NewPlace) -> Result<Place, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO places (user_id, name, latitude, longitude, avg_score, notes, external_source)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(owner_id)
        .bind(&new_place.name)
        .bind(new_place.latitude)
        .bind(new_place.longitude)
        .bind(new_place.avg_score)
        .bind(&new_place.notes)
        .bind(&new_place.external_source)
        .fetch_one(&mut *tx)
        .await?;

        replace_categories(&mut tx, id, &new_place.category_ids).await?;

        tx.commit().await?;

        self.fetch_existing(owner_id, id).await
    }

    async fn find_by_id(&self, owner_id: i64, id: i64) -> Result<Option<Place>, AppError> {
        let query = format!("{PLACE_SELECT} WHERE p.user_id = $1 AND p.id = $2 GROUP BY p.id");
        let row = sqlx::query_as::<_, PlaceRow>(&query)
            .bind(owner_id)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Place>, AppError> {
        let query =
            format!("{PLACE_SELECT} WHERE p.user_id = $1 GROUP BY p.id ORDER BY p.id DESC");
        let rows = sqlx::query_as::<_, PlaceRow>(&query)
            .bind(owner_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        owner_id: i64,
        id: i64,
        patch: PlacePatch,
    ) -> Result<Option<Place>, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE places SET
                name            = COALESCE($3::TEXT, name),
                latitude        = CASE WHEN $4 THEN $5::NUMERIC ELSE latitude END,
                longitude       = CASE WHEN $6 THEN $7::NUMERIC ELSE longitude END,
                avg_score       = CASE WHEN $8 THEN $9::NUMERIC ELSE avg_score END,
                notes           = COALESCE($10::TEXT, notes),
                external_source = COALESCE($11::TEXT, external_source)
            WHERE id = $1 AND user_id = $2
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(patch.name)
        .bind(patch.latitude.is_some())
        .bind(patch.latitude.flatten())
        .bind(patch.longitude.is_some())
        .bind(patch.longitude.flatten())
        .bind(patch.avg_score.is_some())
        .bind(patch.avg_score.flatten())
        .bind(patch.notes)
        .bind(patch.external_source)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        if let Some(category_ids) = &patch.category_ids {
            replace_categories(&mut tx, id, category_ids).await?;
        }

        tx.commit().await?;

        self.fetch_existing(owner_id, id).await.map(Some)
    }

    async fn delete(&self, owner_id: i64, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let owned: Option<i64> =
            sqlx::query_scalar("SELECT id FROM places WHERE id = $1 AND user_id = $2 FOR UPDATE")
                .bind(id)
                .bind(owner_id)
                .fetch_optional(&mut *tx)
                .await?;

        if owned.is_none() {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            "DELETE FROM plan_visits \
             WHERE visit_id IN (SELECT id FROM visits WHERE place_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let visits = sqlx::query("DELETE FROM visits WHERE place_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM place_categories WHERE place_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM places WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            place_id = id,
            visits_deleted = visits.rows_affected(),
            "Place deleted with its visits"
        );

        Ok(true)
    }
}
