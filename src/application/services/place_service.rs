//! Place management scoped to the owning user.

use std::sync::Arc;

use crate::domain::entities::{Category, NewPlace, Place, PlacePatch};
use crate::domain::repositories::{CategoryRepository, PlaceRepository};
use crate::error::AppError;
use serde_json::json;

use super::ensure_all_found;

/// A place with its categories resolved, for the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetails {
    pub place: Place,
    pub categories: Vec<Category>,
}

/// Service for the caller's places.
///
/// Every operation takes the caller's user id; rows of other users are
/// indistinguishable from missing rows.
pub struct PlaceService<P: PlaceRepository, C: CategoryRepository> {
    place_repository: Arc<P>,
    category_repository: Arc<C>,
}

impl<P: PlaceRepository, C: CategoryRepository> PlaceService<P, C> {
    pub fn new(place_repository: Arc<P>, category_repository: Arc<C>) -> Self {
        Self {
            place_repository,
            category_repository,
        }
    }

    pub async fn list(&self, owner_id: i64) -> Result<Vec<Place>, AppError> {
        self.place_repository.list_by_owner(owner_id).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on `categories` if an id does not exist.
    pub async fn create(&self, owner_id: i64, new_place: NewPlace) -> Result<Place, AppError> {
        self.check_categories(&new_place.category_ids).await?;

        let place = self.place_repository.create(owner_id, new_place).await?;
        tracing::info!(user_id = owner_id, place_id = place.id, "Place created");
        Ok(place)
    }

    pub async fn retrieve(&self, owner_id: i64, id: i64) -> Result<PlaceDetails, AppError> {
        let place = self.get(owner_id, id).await?;
        let categories = self
            .category_repository
            .find_many(&place.category_ids)
            .await?;

        Ok(PlaceDetails { place, categories })
    }

    /// Applies the supplied fields; a supplied `category_ids` replaces the set.
    pub async fn partial_update(
        &self,
        owner_id: i64,
        id: i64,
        patch: PlacePatch,
    ) -> Result<Place, AppError> {
        self.get(owner_id, id).await?;
        if let Some(ids) = &patch.category_ids {
            self.check_categories(ids).await?;
        }

        let place = self
            .place_repository
            .update(owner_id, id, patch)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!(user_id = owner_id, place_id = id, "Place updated");
        Ok(place)
    }

    /// Replaces every field; omitted optional fields were already defaulted.
    pub async fn full_update(
        &self,
        owner_id: i64,
        id: i64,
        new_place: NewPlace,
    ) -> Result<Place, AppError> {
        self.partial_update(owner_id, id, new_place.into()).await
    }

    /// Deletes the place together with its visits.
    pub async fn delete(&self, owner_id: i64, id: i64) -> Result<(), AppError> {
        if !self.place_repository.delete(owner_id, id).await? {
            return Err(not_found(id));
        }

        tracing::info!(user_id = owner_id, place_id = id, "Place deleted");
        Ok(())
    }

    /// 404 unless the caller owns `id`. Lets handlers resolve the object
    /// before looking at the request body.
    pub async fn ensure_exists(&self, owner_id: i64, id: i64) -> Result<(), AppError> {
        self.get(owner_id, id).await.map(|_| ())
    }

    async fn get(&self, owner_id: i64, id: i64) -> Result<Place, AppError> {
        self.place_repository
            .find_by_id(owner_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn check_categories(&self, ids: &[i64]) -> Result<(), AppError> {
        if ids.is_empty() {
            return Ok(());
        }

        let found = self.category_repository.find_many(ids).await?;
        ensure_all_found("categories", ids, found.iter().map(|c| c.id))
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found("Place not found", json!({ "id": id }))
}
