//! Fixtures for tests that run the router against a migrated database
//! (`#[sqlx::test]` hands each test a fresh one).

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use crate::auth::jwt::create_access_token;
use crate::auth::rate_limit::RateLimitState;
use crate::config::test_config;
use crate::{build_router, AppState};

pub fn app(db: PgPool) -> Router {
    let state = AppState {
        db,
        config: Arc::new(test_config()),
        rate_limiter: RateLimitState::new(),
    };
    build_router(state).unwrap()
}

/// Insert a user and matching profile; returns the user id.
pub async fn seed_user(db: &PgPool, full_name: Option<&str>, is_admin: bool) -> Uuid {
    let user_id = Uuid::new_v4();
    let email = format!("{}@example.com", user_id);

    sqlx::query("INSERT INTO users (id, email, password_hash) VALUES ($1, $2, 'unused')")
        .bind(user_id)
        .bind(&email)
        .execute(db)
        .await
        .unwrap();

    sqlx::query(
        r#"
        INSERT INTO profiles (id, user_id, full_name, email, is_admin)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(full_name)
    .bind(&email)
    .bind(is_admin)
    .execute(db)
    .await
    .unwrap();

    user_id
}

pub async fn seed_mood(db: &PgPool, user_id: Uuid, label: &str, created_at: DateTime<Utc>) {
    sqlx::query("INSERT INTO moods (id, user_id, mood, created_at) VALUES ($1, $2, $3, $4)")
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(label)
        .bind(created_at)
        .execute(db)
        .await
        .unwrap();
}

pub fn bearer(user_id: Uuid) -> String {
    let token = create_access_token(user_id, "tester@example.com", &test_config()).unwrap();
    format!("Bearer {}", token)
}

pub async fn get_as(app: Router, user_id: Uuid, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::get(uri)
        .header("authorization", bearer(user_id))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json_as(
    app: Router,
    user_id: Uuid,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::post(uri)
        .header("authorization", bearer(user_id))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// `created_at` values of a JSON array of moods, in response order.
pub fn created_ats(moods: &serde_json::Value) -> Vec<DateTime<Utc>> {
    moods
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["created_at"].as_str().unwrap().parse().unwrap())
        .collect()
}

pub fn is_newest_first(times: &[DateTime<Utc>]) -> bool {
    times.windows(2).all(|w| w[0] >= w[1])
}
