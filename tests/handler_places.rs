mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;

#[sqlx::test]
async fn test_places_require_authentication(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server.get("/api/places").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "unauthorized");
}

#[sqlx::test]
async fn test_unknown_token_rejected(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server
        .get("/api/places")
        .add_header("Authorization", common::bearer("not-a-real-token"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
async fn test_list_only_own_places(pool: PgPool) {
    let (ann, ann_token) = common::create_account(&pool, "ann@example.com").await;
    let (bob, _) = common::create_account(&pool, "bob@example.com").await;
    let first = common::create_place(&pool, ann, "Louvre").await;
    let second = common::create_place(&pool, ann, "Orsay").await;
    common::create_place(&pool, bob, "Prado").await;
    let server = common::make_server(pool);

    let response = server
        .get("/api/places")
        .add_header("Authorization", common::bearer(&ann_token))
        .await;

    response.assert_status_ok();
    assert_eq!(common::ids(&response.json::<Value>()), vec![second, first]);
}

#[sqlx::test]
async fn test_create_place_reference_form(pool: PgPool) {
    let (_, token) = common::create_account(&pool, "ann@example.com").await;
    let museums = common::create_category(&pool, "Museums").await;
    let server = common::make_server(pool);

    let response = server
        .post("/api/places")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({
            "name": "Louvre",
            "latitude": "48.8606111",
            "longitude": "2.3376",
            "avg_score": "4.5",
            "external_source": "https://www.louvre.fr",
            "categories": [museums],
            "owner": 999,
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["name"], "Louvre");
    assert_eq!(body["avg_score"], "4.5");
    assert_eq!(body["categories"], json!([museums]));
    assert_eq!(body["notes"], "");
    assert!(body.get("owner").is_none());
}

#[sqlx::test]
async fn test_create_place_validation(pool: PgPool) {
    let (_, token) = common::create_account(&pool, "ann@example.com").await;
    let server = common::make_server(pool);

    let response = server
        .post("/api/places")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({
            "avg_score": "12.5",
            "external_source": "nope",
            "categories": [12345],
        }))
        .await;

    response.assert_status_bad_request();
    let details = &response.json::<Value>()["error"]["details"];
    assert_eq!(details["name"][0], "This field is required.");
    assert!(details["avg_score"].is_array());
    assert!(details["external_source"].is_array());
}

#[sqlx::test]
async fn test_create_place_unknown_category(pool: PgPool) {
    let (_, token) = common::create_account(&pool, "ann@example.com").await;
    let server = common::make_server(pool);

    let response = server
        .post("/api/places")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "name": "Louvre", "categories": [12345] }))
        .await;

    response.assert_status_bad_request();
    let details = &response.json::<Value>()["error"]["details"];
    assert_eq!(
        details["categories"][0],
        "Invalid pk \"12345\" - object does not exist."
    );
}

#[sqlx::test]
async fn test_retrieve_place_detail_form(pool: PgPool) {
    let (ann, token) = common::create_account(&pool, "ann@example.com").await;
    let museums = common::create_category(&pool, "Museums").await;
    let place = common::create_place(&pool, ann, "Louvre").await;
    common::tag_place(&pool, place, museums).await;
    let server = common::make_server(pool);

    let response = server
        .get(&format!("/api/places/{place}"))
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["id"], place);
    assert_eq!(
        body["categories"],
        json!([{ "id": museums, "name": "Museums" }])
    );
}

#[sqlx::test]
async fn test_foreign_place_is_not_found(pool: PgPool) {
    let (_, ann_token) = common::create_account(&pool, "ann@example.com").await;
    let (bob, _) = common::create_account(&pool, "bob@example.com").await;
    let prado = common::create_place(&pool, bob, "Prado").await;
    let server = common::make_server(pool.clone());
    let path = format!("/api/places/{prado}");
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
        .json(&json!({ "name": "" }))
        .await
        .assert_status_not_found();
    server
        .delete(&path)
        .add_header("Authorization", auth)
        .await
        .assert_status_not_found();

    let name: String = sqlx::query_scalar("SELECT name FROM places WHERE id = $1")
        .bind(prado)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "Prado");
}

#[sqlx::test]
async fn test_put_without_categories_clears_them(pool: PgPool) {
    let (ann, token) = common::create_account(&pool, "ann@example.com").await;
    let museums = common::create_category(&pool, "Museums").await;
    let place = common::create_place(&pool, ann, "Louvre").await;
    common::tag_place(&pool, place, museums).await;
    let server = common::make_server(pool);

    let response = server
        .put(&format!("/api/places/{place}"))
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "name": "Louvre Museum" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["name"], "Louvre Museum");
    assert_eq!(body["categories"], json!([]));
}

#[sqlx::test]
async fn test_patch_keeps_absent_fields(pool: PgPool) {
    let (ann, token) = common::create_account(&pool, "ann@example.com").await;
    let museums = common::create_category(&pool, "Museums").await;
    let place = common::create_place(&pool, ann, "Louvre").await;
    common::tag_place(&pool, place, museums).await;
    let server = common::make_server(pool);
    let path = format!("/api/places/{place}");

    server
        .patch(&path)
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "avg_score": "4.0" }))
        .await
        .assert_status_ok();

    let response = server
        .patch(&path)
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "notes": "Go early" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["name"], "Louvre");
    assert_eq!(body["avg_score"], "4.0");
    assert_eq!(body["notes"], "Go early");
    assert_eq!(body["categories"], json!([museums]));
}

#[sqlx::test]
async fn test_patch_null_clears_score(pool: PgPool) {
    let (ann, token) = common::create_account(&pool, "ann@example.com").await;
    let place = common::create_place(&pool, ann, "Louvre").await;
    sqlx::query("UPDATE places SET avg_score = 3.5 WHERE id = $1")
        .bind(place)
        .execute(&pool)
        .await
        .unwrap();
    let server = common::make_server(pool);

    let response = server
        .patch(&format!("/api/places/{place}"))
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "avg_score": null }))
        .await;

    response.assert_status_ok();
    assert!(response.json::<Value>()["avg_score"].is_null());
}

#[sqlx::test]
async fn test_delete_place_cascades_to_visits(pool: PgPool) {
    let (ann, token) = common::create_account(&pool, "ann@example.com").await;
    let place = common::create_place(&pool, ann, "Louvre").await;
    let other = common::create_place(&pool, ann, "Orsay").await;
    let doomed = common::create_visit(&pool, ann, place, "Morning").await;
    let kept = common::create_visit(&pool, ann, other, "Afternoon").await;
    let plan = common::create_plan(&pool, ann, "Paris", &[doomed, kept]).await;
    let server = common::make_server(pool.clone());

    server
        .delete(&format!("/api/places/{place}"))
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM visits").await, 1);

    let response = server
        .get(&format!("/api/plans/{plan}"))
        .add_header("Authorization", common::bearer(&token))
        .await;
    response.assert_status_ok();
    assert_eq!(common::ids(&response.json::<Value>()["visits"]), vec![kept]);
}
