//! Handlers for visit endpoints.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::filters::VisitFilter;
use crate::api::dto::visit::{self, VisitDetail, VisitReference, VisitRequest};
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's visits.
///
/// # Endpoint
///
/// `GET /api/visits?places=1,2`
///
/// `places` restricts the list to visits of those places; an empty value
/// applies no filter.
///
/// # Errors
///
/// Returns 400 on `places` if a token is not an integer.
pub async fn visit_list_handler(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<VisitFilter>,
) -> Result<Json<Vec<VisitReference>>, AppError> {
    let visits = state
        .visit_service
        .list(auth.user_id(), filter.place_ids()?)
        .await?;

    Ok(Json(visits.into_iter().map(visit::to_reference).collect()))
}

/// `POST /api/visits`
///
/// # Errors
///
/// Returns 400 on `place` unless it names one of the caller's places.
pub async fn create_visit_handler(
    auth: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<VisitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VisitReference>), AppError> {
    let Json(payload) = payload?;
    let visit = state
        .visit_service
        .create(auth.user_id(), payload.into_new_visit()?)
        .await?;

    Ok((StatusCode::CREATED, Json(visit::to_reference(visit))))
}

/// `GET /api/visits/{id}`, with the place inlined.
pub async fn get_visit_handler(
    auth: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<VisitDetail>, AppError> {
    let details = state.visit_service.retrieve(auth.user_id(), id).await?;

    Ok(Json(visit::to_detail(details.visit, details.place)))
}

/// `PATCH /api/visits/{id}`
pub async fn patch_visit_handler(
    auth: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
    payload: Result<Json<VisitRequest>, JsonRejection>,
) -> Result<Json<VisitReference>, AppError> {
    state.visit_service.ensure_exists(auth.user_id(), id).await?;
    let Json(payload) = payload?;
    let visit = state
        .visit_service
        .partial_update(auth.user_id(), id, payload.into_patch()?)
        .await?;

    Ok(Json(visit::to_reference(visit)))
}

/// `PUT /api/visits/{id}`
pub async fn put_visit_handler(
    auth: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
    payload: Result<Json<VisitRequest>, JsonRejection>,
) -> Result<Json<VisitReference>, AppError> {
    state.visit_service.ensure_exists(auth.user_id(), id).await?;
    let Json(payload) = payload?;
    let visit = state
        .visit_service
        .full_update(auth.user_id(), id, payload.into_new_visit()?)
        .await?;

    Ok(Json(visit::to_reference(visit)))
}

/// `DELETE /api/visits/{id}`
pub async fn delete_visit_handler(
    auth: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.visit_service.delete(auth.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
