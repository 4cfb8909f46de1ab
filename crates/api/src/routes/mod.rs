//! Route builders, one module per resource.

pub mod auth;
pub mod health;
pub mod shifts;
pub mod timestamps;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /authentication/user                    register (public)
/// /authentication/token                   login (public)
/// /authentication/request-password-reset  request reset link (public)
/// /authentication/reset-password/{token}  set new password (public)
///
/// /timestamps                             create (POST)
/// /timestamps/latest                      latest stamp
/// /timestamps/{id}                        get (owner or manager),
///                                         update, delete (manager)
///
/// /shifts                                 own finished shifts
/// /shifts/{user_id}                       any user's shifts (manager)
///
/// /users                                  list (manager)
/// /users/me                               current user
/// /users/feed                             own stamp feed
/// /users/change-password                  change own password (PATCH)
/// /users/activate/{token}                 activate account (public PUT)
/// /users/{id}                             get, update, delete (manager)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/authentication", auth::router())
        .nest("/timestamps", timestamps::router())
        .nest("/shifts", shifts::router())
        .nest("/users", users::router())
}
