//! HTTP-level integration tests for the `/timestamps` endpoints.
//!
//! Tests cover transition validation at the write boundary, latest-stamp
//! lookup, ownership and role gating, and the optimistic-versioned
//! update/delete paths.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, patch_json_auth, post_json_auth, seed_active_user,
};
use sqlx::PgPool;

async fn stamp_count(pool: &PgPool, user_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM stamps WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Create: transition validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_first_sign_in_succeeds(pool: PgPool) {
    let (_id, password) = seed_active_user(&pool, "worker@test.com", "user").await;
    let app = common::build_test_app(pool.clone());
    let token = common::login(app.clone(), "worker@test.com", &password).await;

    let body = serde_json::json!({ "stamp_type": "sign-in" });
    let response = post_json_auth(app, "/api/v1/timestamps", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["stamp_type"], "sign-in");
    assert_eq!(json["version"], 1);
    assert!(json["id"].is_number());
    assert!(json["stamp_time"].is_string(), "server must assign a time");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_first_non_sign_in_fails(pool: PgPool) {
    let (user_id, password) = seed_active_user(&pool, "early@test.com", "user").await;
    let app = common::build_test_app(pool.clone());
    let token = common::login(app.clone(), "early@test.com", &password).await;

    let body = serde_json::json!({ "stamp_type": "sign-out" });
    let response = post_json_auth(app, "/api/v1/timestamps", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("First action must be sign-in"),
        "got: {}",
        json["error"]
    );
    assert_eq!(stamp_count(&pool, user_id).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_duplicate_sign_in_fails_and_count_stays_one(pool: PgPool) {
    let (user_id, password) = seed_active_user(&pool, "dup@test.com", "user").await;
    let app = common::build_test_app(pool.clone());
    let token = common::login(app.clone(), "dup@test.com", &password).await;

    let body = serde_json::json!({ "stamp_type": "sign-in" });
    let response = post_json_auth(app.clone(), "/api/v1/timestamps", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(app, "/api/v1/timestamps", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(
        json["error"].as_str().unwrap().contains("Duplicate stamp type"),
        "got: {}",
        json["error"]
    );
    assert_eq!(stamp_count(&pool, user_id).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_unknown_stamp_type(pool: PgPool) {
    let (_id, password) = seed_active_user(&pool, "unknown@test.com", "user").await;
    let app = common::build_test_app(pool.clone());
    let token = common::login(app.clone(), "unknown@test.com", &password).await;

    let body = serde_json::json!({ "stamp_type": "lunch" });
    let response = post_json_auth(app, "/api/v1/timestamps", body, &token).await;

    // The closed enum rejects the payload at deserialization.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_accepts_explicit_stamp_time(pool: PgPool) {
    let (_id, password) = seed_active_user(&pool, "explicit@test.com", "user").await;
    let app = common::build_test_app(pool.clone());
    let token = common::login(app.clone(), "explicit@test.com", &password).await;

    let body = serde_json::json!({
        "stamp_type": "sign-in",
        "stamp_time": "2026-03-02T09:00:00Z",
    });
    let response = post_json_auth(app, "/api/v1/timestamps", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["stamp_time"], "2026-03-02T09:00:00Z");
}

// ---------------------------------------------------------------------------
// Latest
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn latest_is_null_without_stamps_then_returns_most_recent(pool: PgPool) {
    let (_id, password) = seed_active_user(&pool, "latest@test.com", "user").await;
    let app = common::build_test_app(pool.clone());
    let token = common::login(app.clone(), "latest@test.com", &password).await;

    let response = get_auth(app.clone(), "/api/v1/timestamps/latest", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.is_null());

    for stamp_type in ["sign-in", "start-break"] {
        let body = serde_json::json!({ "stamp_type": stamp_type });
        let response = post_json_auth(app.clone(), "/api/v1/timestamps", body, &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(app, "/api/v1/timestamps/latest", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["stamp_type"], "start-break");
}

// ---------------------------------------------------------------------------
// Ownership and role gating
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_by_id_allows_owner_and_manager_but_not_peers(pool: PgPool) {
    let (_owner, owner_pw) = seed_active_user(&pool, "owner@test.com", "user").await;
    let (_peer, peer_pw) = seed_active_user(&pool, "peer@test.com", "user").await;
    let (_mgr, mgr_pw) = seed_active_user(&pool, "mgr@test.com", "manager").await;
    let app = common::build_test_app(pool.clone());

    let owner_token = common::login(app.clone(), "owner@test.com", &owner_pw).await;
    let peer_token = common::login(app.clone(), "peer@test.com", &peer_pw).await;
    let mgr_token = common::login(app.clone(), "mgr@test.com", &mgr_pw).await;

    let body = serde_json::json!({ "stamp_type": "sign-in" });
    let response = post_json_auth(app.clone(), "/api/v1/timestamps", body, &owner_token).await;
    let stamp_id = body_json(response).await["id"].as_i64().unwrap();
    let uri = format!("/api/v1/timestamps/{stamp_id}");

    let response = get_auth(app.clone(), &uri, &owner_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app.clone(), &uri, &peer_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, &uri, &mgr_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_and_delete_require_manager_precedence(pool: PgPool) {
    let (_owner, owner_pw) = seed_active_user(&pool, "plain@test.com", "user").await;
    let app = common::build_test_app(pool.clone());
    let token = common::login(app.clone(), "plain@test.com", &owner_pw).await;

    let body = serde_json::json!({ "stamp_type": "sign-in" });
    let response = post_json_auth(app.clone(), "/api/v1/timestamps", body, &token).await;
    let stamp_id = body_json(response).await["id"].as_i64().unwrap();
    let uri = format!("/api/v1/timestamps/{stamp_id}");

    let edit = serde_json::json!({
        "stamp_type": "sign-in",
        "stamp_time": "2026-03-02T08:45:00Z",
        "version": 1,
    });
    let response = patch_json_auth(app.clone(), &uri, edit, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Optimistic concurrency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_applies_with_matching_version_and_rejects_stale(pool: PgPool) {
    let (_owner, owner_pw) = seed_active_user(&pool, "edited@test.com", "user").await;
    let (_mgr, mgr_pw) = seed_active_user(&pool, "editor@test.com", "manager").await;
    let app = common::build_test_app(pool.clone());

    let owner_token = common::login(app.clone(), "edited@test.com", &owner_pw).await;
    let mgr_token = common::login(app.clone(), "editor@test.com", &mgr_pw).await;

    let body = serde_json::json!({ "stamp_type": "sign-in" });
    let response = post_json_auth(app.clone(), "/api/v1/timestamps", body, &owner_token).await;
    let stamp_id = body_json(response).await["id"].as_i64().unwrap();
    let uri = format!("/api/v1/timestamps/{stamp_id}");

    let edit = serde_json::json!({
        "stamp_type": "sign-in",
        "stamp_time": "2026-03-02T08:45:00Z",
        "version": 1,
    });
    let response = patch_json_auth(app.clone(), &uri, edit.clone(), &mgr_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["version"], 2);
    assert_eq!(json["stamp_time"], "2026-03-02T08:45:00Z");

    // The same version is now stale.
    let response = patch_json_auth(app, &uri, edit, &mgr_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_returns_204_then_404(pool: PgPool) {
    let (_owner, owner_pw) = seed_active_user(&pool, "target@test.com", "user").await;
    let (_mgr, mgr_pw) = seed_active_user(&pool, "sweeper@test.com", "manager").await;
    let app = common::build_test_app(pool.clone());

    let owner_token = common::login(app.clone(), "target@test.com", &owner_pw).await;
    let mgr_token = common::login(app.clone(), "sweeper@test.com", &mgr_pw).await;

    let body = serde_json::json!({ "stamp_type": "sign-in" });
    let response = post_json_auth(app.clone(), "/api/v1/timestamps", body, &owner_token).await;
    let stamp_id = body_json(response).await["id"].as_i64().unwrap();
    let uri = format!("/api/v1/timestamps/{stamp_id}");

    let response = delete_auth(app.clone(), &uri, &mgr_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &uri, &mgr_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Feed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn feed_returns_newest_first_by_default(pool: PgPool) {
    let (_id, password) = seed_active_user(&pool, "feed@test.com", "user").await;
    let app = common::build_test_app(pool.clone());
    let token = common::login(app.clone(), "feed@test.com", &password).await;

    for (stamp_type, time) in [
        ("sign-in", "2026-03-02T09:00:00Z"),
        ("start-break", "2026-03-02T12:00:00Z"),
        ("end-break", "2026-03-02T12:30:00Z"),
    ] {
        let body = serde_json::json!({ "stamp_type": stamp_type, "stamp_time": time });
        let response = post_json_auth(app.clone(), "/api/v1/timestamps", body, &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(app.clone(), "/api/v1/users/feed?limit=2", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let feed = json.as_array().unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0]["stamp_type"], "end-break");
    assert_eq!(feed[1]["stamp_type"], "start-break");

    let response = get_auth(app, "/api/v1/users/feed?sort=asc&limit=1", &token).await;
    let json = body_json(response).await;
    assert_eq!(json[0]["stamp_type"], "sign-in");
}
