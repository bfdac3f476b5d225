mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;

#[sqlx::test]
async fn test_filter_by_visits_returns_each_plan_once(pool: PgPool) {
    let (ann, token) = common::create_account(&pool, "ann@example.com").await;
    let louvre = common::create_place(&pool, ann, "Louvre").await;
    let v1 = common::create_visit(&pool, ann, louvre, "First").await;
    let v2 = common::create_visit(&pool, ann, louvre, "Second").await;
    let pl1 = common::create_plan(&pool, ann, "One", &[v1]).await;
    let pl2 = common::create_plan(&pool, ann, "Two", &[v2]).await;
    common::create_plan(&pool, ann, "Three", &[]).await;
    let both = common::create_plan(&pool, ann, "Both", &[v1, v2]).await;
    let server = common::make_server(pool);

    let response = server
        .get(&format!("/api/plans?visits={v1},{v2}"))
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();
    assert_eq!(common::ids(&response.json::<Value>()), vec![both, pl2, pl1]);
}

#[sqlx::test]
async fn test_malformed_visits_filter(pool: PgPool) {
    let (_, token) = common::create_account(&pool, "ann@example.com").await;
    let server = common::make_server(pool);

    let response = server
        .get("/api/plans?visits=1,,2")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_bad_request();
    assert!(response.json::<Value>()["error"]["details"]["visits"].is_array());
}

#[sqlx::test]
async fn test_create_plan(pool: PgPool) {
    let (ann, token) = common::create_account(&pool, "ann@example.com").await;
    let louvre = common::create_place(&pool, ann, "Louvre").await;
    let visit = common::create_visit(&pool, ann, louvre, "Morning").await;
    let server = common::make_server(pool);

    let mut body = common::plan_body("Paris");
    body["visits"] = json!([visit]);

    let response = server
        .post("/api/plans")
        .add_header("Authorization", common::bearer(&token))
        .json(&body)
        .await;

    response.assert_status(StatusCode::CREATED);
    let created = response.json::<Value>();
    assert_eq!(created["budget"], "400.00");
    assert_eq!(created["done"], false);
    assert_eq!(created["visits"], json!([visit]));
}

#[sqlx::test]
async fn test_create_plan_allows_ends_before_begins(pool: PgPool) {
    let (_, token) = common::create_account(&pool, "ann@example.com").await;
    let server = common::make_server(pool);

    let response = server
        .post("/api/plans")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({
            "name": "Backwards",
            "begins": "2020-05-08",
            "ends": "2020-05-01",
            "budget": 10,
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
}

#[sqlx::test]
async fn test_create_plan_missing_fields(pool: PgPool) {
    let (_, token) = common::create_account(&pool, "ann@example.com").await;
    let server = common::make_server(pool);

    let response = server
        .post("/api/plans")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "name": "Paris" }))
        .await;

    response.assert_status_bad_request();
    let details = &response.json::<Value>()["error"]["details"];
    assert!(details["begins"].is_array());
    assert!(details["ends"].is_array());
    assert!(details["budget"].is_array());
}

#[sqlx::test]
async fn test_create_plan_with_foreign_visit(pool: PgPool) {
    let (_, ann_token) = common::create_account(&pool, "ann@example.com").await;
    let (bob, _) = common::create_account(&pool, "bob@example.com").await;
    let prado = common::create_place(&pool, bob, "Prado").await;
    let bobs_visit = common::create_visit(&pool, bob, prado, "Bob's").await;
    let server = common::make_server(pool);

    let mut body = common::plan_body("Madrid");
    body["visits"] = json!([bobs_visit]);

    let response = server
        .post("/api/plans")
        .add_header("Authorization", common::bearer(&ann_token))
        .json(&body)
        .await;

    response.assert_status_bad_request();
    assert!(response.json::<Value>()["error"]["details"]["visits"].is_array());
}

#[sqlx::test]
async fn test_patch_name_and_visits_only(pool: PgPool) {
    let (ann, token) = common::create_account(&pool, "ann@example.com").await;
    let louvre = common::create_place(&pool, ann, "Louvre").await;
    let v1 = common::create_visit(&pool, ann, louvre, "First").await;
    let v2 = common::create_visit(&pool, ann, louvre, "Second").await;
    let plan = common::create_plan(&pool, ann, "Paris", &[v1]).await;
    let server = common::make_server(pool);
    let auth = common::bearer(&token);

    let before = server
        .get(&format!("/api/plans/{plan}"))
        .add_header("Authorization", auth.clone())
        .await
        .json::<Value>();

    let response = server
        .patch(&format!("/api/plans/{plan}"))
        .add_header("Authorization", auth)
        .json(&json!({ "name": "Paris again", "visits": [v2] }))
        .await;

    response.assert_status_ok();
    let after = response.json::<Value>();
    assert_eq!(after["name"], "Paris again");
    assert_eq!(after["visits"], json!([v2]));
    for field in ["begins", "ends", "budget", "done"] {
        assert_eq!(after[field], before[field], "field {field}");
    }
}

#[sqlx::test]
async fn test_retrieve_plan_detail_form(pool: PgPool) {
    let (ann, token) = common::create_account(&pool, "ann@example.com").await;
    let louvre = common::create_place(&pool, ann, "Louvre").await;
    let visit = common::create_visit(&pool, ann, louvre, "Morning").await;
    let plan = common::create_plan(&pool, ann, "Paris", &[visit]).await;
    let server = common::make_server(pool);

    let response = server
        .get(&format!("/api/plans/{plan}"))
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["begins"], "2020-05-01");
    assert_eq!(body["visits"][0]["id"], visit);
    assert_eq!(body["visits"][0]["place"], louvre);
    assert_eq!(body["visits"][0]["title"], "Morning");
}

#[sqlx::test]
async fn test_delete_plan_keeps_visits(pool: PgPool) {
    let (ann, token) = common::create_account(&pool, "ann@example.com").await;
    let louvre = common::create_place(&pool, ann, "Louvre").await;
    let visit = common::create_visit(&pool, ann, louvre, "Morning").await;
    let plan = common::create_plan(&pool, ann, "Paris", &[visit]).await;
    let server = common::make_server(pool.clone());

    server
        .delete(&format!("/api/plans/{plan}"))
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM visits").await, 1);
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM plan_visits").await, 0);
}

#[sqlx::test]
async fn test_foreign_plan_is_not_found(pool: PgPool) {
    let (_, ann_token) = common::create_account(&pool, "ann@example.com").await;
    let (bob, _) = common::create_account(&pool, "bob@example.com").await;
    let plan = common::create_plan(&pool, bob, "Madrid", &[]).await;
    let server = common::make_server(pool.clone());
    let path = format!("/api/plans/{plan}");
    let auth = common::bearer(&ann_token);

    server
        .get(&path)
        .add_header("Authorization", auth.clone())
        .await
        .assert_status_not_found();
    server
        .patch(&path)
        .add_header("Authorization", auth.clone())
        .json(&json!({ "name": "Mine now" }))
        .await
        .assert_status_not_found();
    server
        .put(&path)
        .add_header("Authorization", auth.clone())
        .json(&common::plan_body("Mine now"))
        .await
        .assert_status_not_found();
    server
        .delete(&path)
        .add_header("Authorization", auth)
        .await
        .assert_status_not_found();

    let name: String = sqlx::query_scalar("SELECT name FROM plans WHERE id = $1")
        .bind(plan)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "Madrid");
}

#[sqlx::test]
async fn test_list_only_own_plans(pool: PgPool) {
    let (ann, ann_token) = common::create_account(&pool, "ann@example.com").await;
    let (bob, _) = common::create_account(&pool, "bob@example.com").await;
    let paris = common::create_plan(&pool, ann, "Paris", &[]).await;
    common::create_plan(&pool, bob, "Madrid", &[]).await;
    let server = common::make_server(pool);

    let response = server
        .get("/api/plans")
        .add_header("Authorization", common::bearer(&ann_token))
        .await;

    response.assert_status_ok();
    assert_eq!(common::ids(&response.json::<Value>()), vec![paris]);
}

#[sqlx::test]
async fn test_invalid_body_on_missing_plan_is_not_found(pool: PgPool) {
    let (_, token) = common::create_account(&pool, "ann@example.com").await;
    let server = common::make_server(pool);
    let auth = common::bearer(&token);

    server
        .patch("/api/plans/9999")
        .add_header("Authorization", auth.clone())
        .json(&json!({ "name": "" }))
        .await
        .assert_status_not_found();
    server
        .put("/api/plans/9999")
        .add_header("Authorization", auth)
        .json(&json!({ "name": "Paris" }))
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_patch_null_budget_rejected(pool: PgPool) {
    let (ann, token) = common::create_account(&pool, "ann@example.com").await;
    let plan = common::create_plan(&pool, ann, "Paris", &[]).await;
    let server = common::make_server(pool);

    let response = server
        .patch(&format!("/api/plans/{plan}"))
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "budget": null }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["details"]["budget"][0],
        "This field may not be null."
    );
}
