#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use movies_api::auth::api_key::hash_api_key;
use movies_api::auth::jwt::{generate_access_token, Grants, JwtConfig};
use movies_api::config::ServerConfig;
use movies_api::router::build_app_router;
use movies_api::state::AppState;
use movies_core::types::UserId;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

/// Plaintext admin API key accepted by [`test_config`].
pub const TEST_API_KEY: &str = "test-admin-api-key";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        issuer: None,
        audience: None,
        access_token_expiry_mins: 15,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
        api_key_hash: hash_api_key(TEST_API_KEY),
    }
}

/// The full application router over `pool`, with the production middleware
/// stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_router(AppState::new(pool, config.clone()), &config)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

fn token(user_id: UserId, grants: Grants) -> String {
    generate_access_token(user_id, grants, &test_jwt_config()).expect("token generation")
}

pub fn admin_token() -> String {
    token(
        Uuid::now_v7(),
        Grants {
            admin: true,
            trusted_member: false,
        },
    )
}

pub fn trusted_member_token() -> String {
    token(
        Uuid::now_v7(),
        Grants {
            admin: false,
            trusted_member: true,
        },
    )
}

/// Token for a user with no extra grants.
pub fn user_token(user_id: UserId) -> String {
    token(user_id, Grants::default())
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Create a movie through the API as a trusted member and return its JSON.
pub async fn create_movie(app: Router, title: &str, year: i32, genres: &[&str]) -> serde_json::Value {
    let body = serde_json::json!({
        "title": title,
        "yearOfRelease": year,
        "genres": genres,
    });
    let response = post_json_auth(app, "/api/v1/movies", body, &trusted_member_token()).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
