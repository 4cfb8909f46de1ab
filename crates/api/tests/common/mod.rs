//! Shared harness for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as `main.rs`)
//! on top of the test-provisioned database pool, plus request helpers.

// Each integration test binary compiles this module independently and none
// of them uses every helper.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use timeclock_api::auth::jwt::JwtConfig;
use timeclock_api::auth::password::hash_password;
use timeclock_api::config::{MailConfig, RateLimitConfig, ServerConfig};
use timeclock_api::mailer::Mailer;
use timeclock_api::ratelimit::FixedWindowLimiter;
use timeclock_api::router::build_app_router;
use timeclock_api::state::AppState;
use timeclock_db::models::user::CreateUser;
use timeclock_db::repositories::{RoleRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults.
///
/// Mail runs in sandbox mode (nothing is delivered) and the rate limiter is
/// disabled so tests are never throttled; the dedicated rate-limit tests
/// enable it explicitly.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        frontend_url: "http://localhost:5173".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        mail: MailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: "no-reply@timeclock.local".to_string(),
            invitation_expiry_days: 3,
            reset_expiry_mins: 60,
            sandbox: true,
        },
        rate_limit: RateLimitConfig {
            enabled: false,
            requests_per_window: 20,
            window_secs: 5,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and the default test config.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

/// Build the application router with an explicit config (used by the
/// rate-limit tests).
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let mailer = Mailer::from_config(&config.mail).expect("test mailer should build");
    let limiter = FixedWindowLimiter::new(
        config.rate_limit.requests_per_window,
        Duration::from_secs(config.rate_limit.window_secs),
    );

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer: Arc::new(mailer),
        limiter: Arc::new(limiter),
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Database seeding helpers
// ---------------------------------------------------------------------------

/// Create an activated user with the given role directly in the database,
/// bypassing the email flow. Returns the user id and the plaintext password.
pub async fn seed_active_user(pool: &PgPool, email: &str, role: &str) -> (i64, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");

    let role = RoleRepo::find_by_name(pool, role)
        .await
        .expect("role lookup should succeed")
        .expect("roles must be seeded by migration");

    let user = UserRepo::create_and_invite(
        pool,
        &CreateUser {
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password_hash: hashed,
            role_id: role.id,
        },
        &format!("seed-token-{email}"),
        chrono::Utc::now() + chrono::Duration::days(1),
    )
    .await
    .expect("user creation should succeed");

    sqlx::query("UPDATE users SET is_active = TRUE WHERE id = $1")
        .bind(user.id)
        .execute(pool)
        .await
        .expect("activation should succeed");

    (user.id, password.to_string())
}

/// Log a user in via the API and return the access token.
pub async fn login(app: Router, email: &str, password: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/authentication/token", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("response must contain access_token")
        .to_string()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("PATCH")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into a JSON value.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
