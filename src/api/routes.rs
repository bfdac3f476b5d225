//! API route configuration.
//!
//! Authentication is enforced per handler through the
//! [`AuthUser`](crate::api::middleware::AuthUser) extractor, so a single
//! path can mix public and protected methods.

use crate::api::handlers::{
    category_list_handler, create_category_handler, create_place_handler, create_plan_handler,
    create_visit_handler, delete_place_handler, delete_plan_handler, delete_visit_handler,
    get_place_handler, get_plan_handler, get_visit_handler, patch_place_handler,
    patch_plan_handler, patch_visit_handler, place_list_handler, plan_list_handler,
    put_place_handler, put_plan_handler, put_visit_handler, visit_list_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All resource routes, mounted under `/api` by the application router.
///
/// # Endpoints
///
/// - `GET    /categorys`       - List categories (public)
/// - `POST   /categorys`       - Create a category
/// - `GET    /places`          - List own places
/// - `POST   /places`          - Create a place
/// - `GET    /places/{id}`     - Place with categories inlined
/// - `PATCH  /places/{id}`     - Partial update
/// - `PUT    /places/{id}`     - Full replace
/// - `DELETE /places/{id}`     - Delete with visits
/// - `/visits`, `/visits/{id}` - Same verbs; list takes `?places=`
/// - `/plans`, `/plans/{id}`   - Same verbs; list takes `?visits=`
pub fn travel_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categorys",
            get(category_list_handler).post(create_category_handler),
        )
        .route("/places", get(place_list_handler).post(create_place_handler))
        .route(
            "/places/{id}",
            get(get_place_handler)
                .patch(patch_place_handler)
                .put(put_place_handler)
                .delete(delete_place_handler),
        )
        .route("/visits", get(visit_list_handler).post(create_visit_handler))
        .route(
            "/visits/{id}",
            get(get_visit_handler)
                .patch(patch_visit_handler)
                .put(put_visit_handler)
                .delete(delete_visit_handler),
        )
        .route("/plans", get(plan_list_handler).post(create_plan_handler))
        .route(
            "/plans/{id}",
            get(get_plan_handler)
                .patch(patch_plan_handler)
                .put(put_plan_handler)
                .delete(delete_plan_handler),
        )
}
