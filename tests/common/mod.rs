#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::Arc;
use travel_planner::application::services::auth_service::hash_token;
use travel_planner::routes::base_router;
use travel_planner::state::AppState;

pub const SIGNING_SECRET: &str = "test-signing-secret";

pub async fn create_test_user(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (email, name) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind("Test User")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Stores a token for `user_id` and returns the raw value.
pub async fn create_token(pool: &PgPool, user_id: i64, raw: &str) -> String {
    sqlx::query("INSERT INTO api_tokens (user_id, name, token_hash) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(format!("token-{raw}"))
        .bind(hash_token(SIGNING_SECRET, raw))
        .execute(pool)
        .await
        .unwrap();
    raw.to_string()
}

/// A user together with a working bearer token.
pub async fn create_account(pool: &PgPool, email: &str) -> (i64, String) {
    let user_id = create_test_user(pool, email).await;
    let token = create_token(pool, user_id, &format!("token-for-{user_id}")).await;
    (user_id, token)
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(pool), SIGNING_SECRET.to_string())
}

pub fn make_server(pool: PgPool) -> TestServer {
    TestServer::new(base_router(create_test_state(pool))).unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub async fn create_category(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_place(pool: &PgPool, user_id: i64, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO places (user_id, name) VALUES ($1, $2) RETURNING id")
        .bind(user_id)
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn tag_place(pool: &PgPool, place_id: i64, category_id: i64) {
    sqlx::query("INSERT INTO place_categories (place_id, category_id) VALUES ($1, $2)")
        .bind(place_id)
        .bind(category_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_visit(pool: &PgPool, user_id: i64, place_id: i64, title: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO visits (user_id, place_id, title) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(user_id)
    .bind(place_id)
    .bind(title)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_plan(pool: &PgPool, user_id: i64, name: &str, visit_ids: &[i64]) -> i64 {
    let plan_id: i64 = sqlx::query_scalar(
        "INSERT INTO plans (user_id, name, begins, ends, budget) \
         VALUES ($1, $2, DATE '2020-05-01', DATE '2020-05-08', 400.00) RETURNING id",
    )
    .bind(user_id)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap();

    for visit_id in visit_ids {
        sqlx::query("INSERT INTO plan_visits (plan_id, visit_id) VALUES ($1, $2)")
            .bind(plan_id)
            .bind(visit_id)
            .execute(pool)
            .await
            .unwrap();
    }

    plan_id
}

pub async fn count(pool: &PgPool, sql: &str) -> i64 {
    sqlx::query_scalar(sql).fetch_one(pool).await.unwrap()
}

/// Ids of a JSON array response, in order.
pub fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

pub fn plan_body(name: &str) -> Value {
    json!({
        "name": name,
        "begins": "2020-05-01",
        "ends": "2020-05-08",
        "budget": "400.00",
    })
}
