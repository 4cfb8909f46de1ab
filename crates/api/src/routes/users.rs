//! Route definitions for the `/users` resource.

use axum::routing::{get, patch, put};
use axum::Router;

use crate::handlers::{auth, users};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                   -> list (manager)
/// GET    /me                 -> me
/// GET    /feed               -> feed
/// PATCH  /change-password    -> change_password
/// PUT    /activate/{token}   -> activate (public)
/// GET    /{id}               -> get_by_id (manager)
/// PATCH  /{id}               -> update (manager)
/// DELETE /{id}               -> delete (manager)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/me", get(users::me))
        .route("/feed", get(users::feed))
        .route("/change-password", patch(auth::change_password))
        .route("/activate/{token}", put(users::activate))
        .route(
            "/{id}",
            get(users::get_by_id)
                .patch(users::update)
                .delete(users::delete),
        )
}
