//! Handlers for category endpoints.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};

use crate::api::dto::category::{CategoryItem, CategoryRequest};
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all categories, name descending. No authentication required.
///
/// # Endpoint
///
/// `GET /api/categorys`
pub async fn category_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryItem>>, AppError> {
    let categories = state.category_service.list().await?;

    Ok(Json(categories.into_iter().map(CategoryItem::from).collect()))
}

/// Creates a category.
///
/// # Endpoint
///
/// `POST /api/categorys`
///
/// # Errors
///
/// Returns 400 if `name` is missing, blank, too long or already taken.
pub async fn create_category_handler(
    _auth: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CategoryItem>), AppError> {
    let Json(payload) = payload?;
    let category = state
        .category_service
        .create(payload.into_new_category()?)
        .await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}
