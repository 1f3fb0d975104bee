#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use roomly_api::auth::jwt::JwtConfig;
use roomly_api::config::ServerConfig;
use roomly_api::router::build_app_router;
use roomly_api::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and the default page size of 10.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        default_page_size: 10,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            issuer: None,
            audience: None,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_shutdown(pool, CancellationToken::new())
}

/// Like [`build_test_app`], with a caller-controlled shutdown token.
pub fn build_test_app_with_shutdown(pool: PgPool, shutdown: CancellationToken) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        shutdown,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Sign a token the way the identity provider would.
pub fn token(subject: &str, roles: &[&str]) -> String {
    let claims = serde_json::json!({
        "sub": subject,
        "email": format!("{subject}@example.com"),
        "name": subject,
        "realm_access": { "roles": roles },
        "exp": chrono::Utc::now().timestamp() + 3600,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn admin_token() -> String {
    token("kc-admin", &["admin"])
}

pub fn landlord_token(subject: &str) -> String {
    token(subject, &["landlord"])
}

pub fn tenant_token() -> String {
    token("kc-tenant", &["tenant"])
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a country and a city as admin; returns the city id.
pub async fn seed_city(pool: &PgPool) -> i64 {
    let admin = admin_token();
    let country = post_json(
        build_test_app(pool.clone()),
        "/api/v1/countries",
        &admin,
        serde_json::json!({ "name": "Portugal", "iso_code": "PT" }),
    )
    .await;
    let country_id = body_json(country).await["data"]["id"].as_i64().unwrap();

    let city = post_json(
        build_test_app(pool.clone()),
        "/api/v1/cities",
        &admin,
        serde_json::json!({
            "country_id": country_id,
            "name": "Lisbon",
            "latitude": 38.72,
            "longitude": -9.14,
        }),
    )
    .await;
    body_json(city).await["data"]["id"].as_i64().unwrap()
}

/// Create an apartment as the landlord behind `token`; returns its id.
pub async fn seed_apartment(pool: &PgPool, token: &str, city_id: i64, price: f64) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/apartments",
        token,
        serde_json::json!({
            "city_id": city_id,
            "title": format!("Flat at {price}"),
            "address": "Rua Augusta 1",
            "price_per_night": price,
            "bedrooms": 2,
            "bathrooms": 1,
            "area_sqm": 60.0,
            "latitude": 38.71,
            "longitude": -9.13,
        }),
    )
    .await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
