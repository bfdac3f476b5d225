mod common;

use sqlx::PgPool;
use std::sync::Arc;
use travel_planner::domain::repositories::TokenRepository;
use travel_planner::infrastructure::persistence::PgTokenRepository;

#[sqlx::test]
async fn test_create_token(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "ann@example.com").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo.create_token(user_id, "laptop", "hash123").await.unwrap();

    assert_eq!(token.user_id, user_id);
    assert_eq!(token.name, "laptop");
    assert_eq!(token.token_hash, "hash123");
    assert!(token.last_used_at.is_none());
    assert!(token.revoked_at.is_none());
}

#[sqlx::test]
async fn test_find_user_id(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "ann@example.com").await;
    let repo = PgTokenRepository::new(Arc::new(pool));
    repo.create_token(user_id, "laptop", "validhash").await.unwrap();

    assert_eq!(repo.find_user_id("validhash").await.unwrap(), Some(user_id));
    assert_eq!(repo.find_user_id("nonexistent").await.unwrap(), None);
}

#[sqlx::test]
async fn test_revoked_token_is_not_found(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "ann@example.com").await;
    let repo = PgTokenRepository::new(Arc::new(pool));
    let token = repo
        .create_token(user_id, "laptop", "revokedhash")
        .await
        .unwrap();

    assert!(repo.revoke_token(token.id).await.unwrap());
    assert!(!repo.revoke_token(token.id).await.unwrap());
    assert_eq!(repo.find_user_id("revokedhash").await.unwrap(), None);
}

#[sqlx::test]
async fn test_inactive_user_token_is_not_found(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "ann@example.com").await;
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();
    let repo = PgTokenRepository::new(Arc::new(pool));
    repo.create_token(user_id, "laptop", "hash").await.unwrap();

    assert_eq!(repo.find_user_id("hash").await.unwrap(), None);
}

#[sqlx::test]
async fn test_update_last_used(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "ann@example.com").await;
    let repo = PgTokenRepository::new(Arc::new(pool));
    repo.create_token(user_id, "laptop", "usedhash").await.unwrap();

    repo.update_last_used("usedhash").await.unwrap();

    let token = repo.find_by_name("laptop").await.unwrap().unwrap();
    assert!(token.last_used_at.is_some());
}

#[sqlx::test]
async fn test_list_and_find_by_name(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "ann@example.com").await;
    let repo = PgTokenRepository::new(Arc::new(pool));
    repo.create_token(user_id, "laptop", "h1").await.unwrap();
    repo.create_token(user_id, "phone", "h2").await.unwrap();

    let tokens = repo.list_tokens().await.unwrap();
    assert_eq!(tokens.len(), 2);

    assert!(repo.find_by_name("phone").await.unwrap().is_some());
    assert!(repo.find_by_name("tablet").await.unwrap().is_none());
}
