//! Visit management scoped to the owning user.

use std::sync::Arc;

use crate::domain::entities::{NewVisit, Place, Visit, VisitPatch};
use crate::domain::repositories::{PlaceRepository, VisitRepository};
use crate::error::AppError;
use serde_json::json;

use super::invalid_pk;

/// A visit with its place, for the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitDetails {
    pub visit: Visit,
    pub place: Place,
}

pub struct VisitService<V: VisitRepository, P: PlaceRepository> {
    visit_repository: Arc<V>,
    place_repository: Arc<P>,
}

impl<V: VisitRepository, P: PlaceRepository> VisitService<V, P> {
    pub fn new(visit_repository: Arc<V>, place_repository: Arc<P>) -> Self {
        Self {
            visit_repository,
            place_repository,
        }
    }

    /// Lists the caller's visits, restricted to `place_ids` when given.
    pub async fn list(
        &self,
        owner_id: i64,
        place_ids: Option<Vec<i64>>,
    ) -> Result<Vec<Visit>, AppError> {
        self.visit_repository.list_by_owner(owner_id, place_ids).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on `place` unless the place exists
    /// and belongs to the caller.
    pub async fn create(&self, owner_id: i64, new_visit: NewVisit) -> Result<Visit, AppError> {
        self.check_place(owner_id, new_visit.place_id).await?;

        let visit = self.visit_repository.create(owner_id, new_visit).await?;
        tracing::info!(
            user_id = owner_id,
            visit_id = visit.id,
            place_id = visit.place_id,
            "Visit created"
        );
        Ok(visit)
    }

    pub async fn retrieve(&self, owner_id: i64, id: i64) -> Result<VisitDetails, AppError> {
        let visit = self.get(owner_id, id).await?;
        let place = self
            .place_repository
            .find_by_id(owner_id, visit.place_id)
            .await?
            .ok_or_else(|| {
                AppError::internal(
                    "Visit references a missing place",
                    json!({ "id": id, "place_id": visit.place_id }),
                )
            })?;

        Ok(VisitDetails { visit, place })
    }

    pub async fn partial_update(
        &self,
        owner_id: i64,
        id: i64,
        patch: VisitPatch,
    ) -> Result<Visit, AppError> {
        self.get(owner_id, id).await?;
        if let Some(place_id) = patch.place_id {
            self.check_place(owner_id, place_id).await?;
        }

        let visit = self
            .visit_repository
            .update(owner_id, id, patch)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!(user_id = owner_id, visit_id = id, "Visit updated");
        Ok(visit)
    }

    pub async fn full_update(
        &self,
        owner_id: i64,
        id: i64,
        new_visit: NewVisit,
    ) -> Result<Visit, AppError> {
        self.partial_update(owner_id, id, new_visit.into()).await
    }

    /// Deletes the visit and detaches it from every plan.
    pub async fn delete(&self, owner_id: i64, id: i64) -> Result<(), AppError> {
        if !self.visit_repository.delete(owner_id, id).await? {
            return Err(not_found(id));
        }

        tracing::info!(user_id = owner_id, visit_id = id, "Visit deleted");
        Ok(())
    }

    /// 404 unless the caller owns `id`. Lets handlers resolve the object
    /// before looking at the request body.
    pub async fn ensure_exists(&self, owner_id: i64, id: i64) -> Result<(), AppError> {
        self.get(owner_id, id).await.map(|_| ())
    }

    async fn get(&self, owner_id: i64, id: i64) -> Result<Visit, AppError> {
        self.visit_repository
            .find_by_id(owner_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn check_place(&self, owner_id: i64, place_id: i64) -> Result<(), AppError> {
        match self.place_repository.find_by_id(owner_id, place_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::field("place", invalid_pk(place_id))),
        }
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found("Visit not found", json!({ "id": id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockPlaceRepository, MockVisitRepository};

    fn place(id: i64, owner_id: i64) -> Place {
        Place {
            id,
            owner_id,
            name: "Pier".to_string(),
            latitude: None,
            longitude: None,
            avg_score: None,
            notes: String::new(),
            external_source: String::new(),
            category_ids: vec![],
        }
    }

    fn visit(id: i64, owner_id: i64, place_id: i64) -> Visit {
        Visit {
            id,
            owner_id,
            title: String::new(),
            place_id,
            time: None,
            score: None,
            notes: String::new(),
        }
    }

    fn new_visit(place_id: i64) -> NewVisit {
        NewVisit {
            title: "Sunset".to_string(),
            place_id,
            time: None,
            score: None,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_foreign_place() {
        let mut places = MockPlaceRepository::new();
        places
            .expect_find_by_id()
            .withf(|owner_id, id| *owner_id == 1 && *id == 50)
            .returning(|_, _| Ok(None));

        let mut visits = MockVisitRepository::new();
        visits.expect_create().never();

        let service = VisitService::new(Arc::new(visits), Arc::new(places));
        let err = service.create(1, new_visit(50)).await.unwrap_err();

        let (_, info) = err.to_error_info();
        assert_eq!(info.details["place"][0], "Invalid pk \"50\" - object does not exist.");
    }

    #[tokio::test]
    async fn test_create_with_own_place() {
        let mut places = MockPlaceRepository::new();
        places
            .expect_find_by_id()
            .returning(|owner_id, id| Ok(Some(place(id, owner_id))));

        let mut visits = MockVisitRepository::new();
        visits
            .expect_create()
            .times(1)
            .returning(|owner_id, new| Ok(visit(3, owner_id, new.place_id)));

        let service = VisitService::new(Arc::new(visits), Arc::new(places));
        let created = service.create(1, new_visit(8)).await.unwrap();

        assert_eq!(created.place_id, 8);
    }

    #[tokio::test]
    async fn test_list_passes_place_filter() {
        let mut visits = MockVisitRepository::new();
        visits
            .expect_list_by_owner()
            .withf(|owner_id, place_ids| *owner_id == 1 && place_ids.as_deref() == Some(&[4][..]))
            .times(1)
            .returning(|owner_id, _| Ok(vec![visit(2, owner_id, 4)]));

        let service = VisitService::new(Arc::new(visits), Arc::new(MockPlaceRepository::new()));
        let listed = service.list(1, Some(vec![4])).await.unwrap();

        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_retrieve_includes_place() {
        let mut visits = MockVisitRepository::new();
        visits
            .expect_find_by_id()
            .returning(|owner_id, id| Ok(Some(visit(id, owner_id, 6))));

        let mut places = MockPlaceRepository::new();
        places
            .expect_find_by_id()
            .returning(|owner_id, id| Ok(Some(place(id, owner_id))));

        let service = VisitService::new(Arc::new(visits), Arc::new(places));
        let details = service.retrieve(1, 2).await.unwrap();

        assert_eq!(details.place.id, 6);
    }

    #[tokio::test]
    async fn test_patch_without_place_skips_place_check() {
        let mut visits = MockVisitRepository::new();
        visits
            .expect_find_by_id()
            .returning(|owner_id, id| Ok(Some(visit(id, owner_id, 6))));
        visits
            .expect_update()
            .returning(|owner_id, id, _| Ok(Some(visit(id, owner_id, 6))));

        let mut places = MockPlaceRepository::new();
        places.expect_find_by_id().never();

        let service = VisitService::new(Arc::new(visits), Arc::new(places));
        let patch = VisitPatch {
            time: Some(None),
            ..Default::default()
        };

        assert!(service.partial_update(1, 2, patch).await.is_ok());
    }

    #[tokio::test]
    async fn test_ensure_exists_scopes_by_owner() {
        let mut visits = MockVisitRepository::new();
        visits
            .expect_find_by_id()
            .returning(|owner_id, id| Ok((owner_id == 1).then(|| visit(id, owner_id, 3))));

        let service = VisitService::new(Arc::new(visits), Arc::new(MockPlaceRepository::new()));

        assert!(service.ensure_exists(1, 8).await.is_ok());
        assert!(matches!(
            service.ensure_exists(2, 8).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }
}
