//! Handlers for plan endpoints.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::filters::PlanFilter;
use crate::api::dto::plan::{self, PlanDetail, PlanReference, PlanRequest};
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's plans.
///
/// # Endpoint
///
/// `GET /api/plans?visits=1,2`
///
/// With `visits`, only plans containing at least one of the given visits
/// are returned, each once.
pub async fn plan_list_handler(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<PlanFilter>,
) -> Result<Json<Vec<PlanReference>>, AppError> {
    let plans = state
        .plan_service
        .list(auth.user_id(), filter.visit_ids()?)
        .await?;

    Ok(Json(plans.into_iter().map(plan::to_reference).collect()))
}

/// `POST /api/plans`
pub async fn create_plan_handler(
    auth: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PlanReference>), AppError> {
    let Json(payload) = payload?;
    let plan = state
        .plan_service
        .create(auth.user_id(), payload.into_new_plan()?)
        .await?;

    Ok((StatusCode::CREATED, Json(plan::to_reference(plan))))
}

/// `GET /api/plans/{id}`, with visits inlined.
pub async fn get_plan_handler(
    auth: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<PlanDetail>, AppError> {
    let details = state.plan_service.retrieve(auth.user_id(), id).await?;

    Ok(Json(plan::to_detail(details.plan, details.visits)))
}

/// `PATCH /api/plans/{id}`
///
/// Only supplied fields change; a supplied `visits` list replaces the set.
pub async fn patch_plan_handler(
    auth: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<PlanReference>, AppError> {
    state.plan_service.ensure_exists(auth.user_id(), id).await?;
    let Json(payload) = payload?;
    let plan = state
        .plan_service
        .partial_update(auth.user_id(), id, payload.into_patch()?)
        .await?;

    Ok(Json(plan::to_reference(plan)))
}

/// `PUT /api/plans/{id}`
pub async fn put_plan_handler(
    auth: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<PlanReference>, AppError> {
    state.plan_service.ensure_exists(auth.user_id(), id).await?;
    let Json(payload) = payload?;
    let plan = state
        .plan_service
        .full_update(auth.user_id(), id, payload.into_new_plan()?)
        .await?;

    Ok(Json(plan::to_reference(plan)))
}

/// `DELETE /api/plans/{id}`
///
/// The plan's visits are kept.
pub async fn delete_plan_handler(
    auth: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.plan_service.delete(auth.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
