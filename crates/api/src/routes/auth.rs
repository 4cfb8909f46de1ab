//! Route definitions for the `/authentication` resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/authentication`. All public; the rate limiter in
/// front of the router is the only guard.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", post(auth::register))
        .route("/token", post(auth::login))
        .route("/request-password-reset", post(auth::request_password_reset))
        .route("/reset-password/{token}", put(auth::reset_password))
}
