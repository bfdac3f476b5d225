//! Handlers for place endpoints.
//!
//! All endpoints act on the caller's places only; another user's place
//! answers 404 exactly like a missing one.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::place::{self, PlaceDetail, PlaceReference, PlaceRequest};
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/places`
pub async fn place_list_handler(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<PlaceReference>>, AppError> {
    let places = state.place_service.list(auth.user_id()).await?;

    Ok(Json(places.into_iter().map(place::to_reference).collect()))
}

/// Creates a place owned by the caller.
///
/// # Endpoint
///
/// `POST /api/places`
///
/// # Errors
///
/// Returns 400 on field validation failures or unknown category ids.
pub async fn create_place_handler(
    auth: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<PlaceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PlaceReference>), AppError> {
    let Json(payload) = payload?;
    let place = state
        .place_service
        .create(auth.user_id(), payload.into_new_place()?)
        .await?;

    Ok((StatusCode::CREATED, Json(place::to_reference(place))))
}

/// Returns one place with its categories inlined.
///
/// # Endpoint
///
/// `GET /api/places/{id}`
pub async fn get_place_handler(
    auth: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<PlaceDetail>, AppError> {
    let details = state.place_service.retrieve(auth.user_id(), id).await?;

    Ok(Json(place::to_detail(details.place, details.categories)))
}

/// Partially updates a place.
///
/// # Endpoint
///
/// `PATCH /api/places/{id}`
///
/// Absent fields are left unchanged; `null` clears a nullable decimal;
/// a supplied `categories` list replaces the whole set.
pub async fn patch_place_handler(
    auth: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
    payload: Result<Json<PlaceRequest>, JsonRejection>,
) -> Result<Json<PlaceReference>, AppError> {
    state.place_service.ensure_exists(auth.user_id(), id).await?;
    let Json(payload) = payload?;
    let place = state
        .place_service
        .partial_update(auth.user_id(), id, payload.into_patch()?)
        .await?;

    Ok(Json(place::to_reference(place)))
}

/// Replaces a place.
///
/// # Endpoint
///
/// `PUT /api/places/{id}`
///
/// Omitted optional fields reset to their defaults; an omitted
/// `categories` clears the set.
pub async fn put_place_handler(
    auth: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
    payload: Result<Json<PlaceRequest>, JsonRejection>,
) -> Result<Json<PlaceReference>, AppError> {
    state.place_service.ensure_exists(auth.user_id(), id).await?;
    let Json(payload) = payload?;
    let place = state
        .place_service
        .full_update(auth.user_id(), id, payload.into_new_place()?)
        .await?;

    Ok(Json(place::to_reference(place)))
}

/// Deletes a place, its visits and their plan memberships.
///
/// # Endpoint
///
/// `DELETE /api/places/{id}`
pub async fn delete_place_handler(
    auth: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.place_service.delete(auth.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
