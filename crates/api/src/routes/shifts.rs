//! Route definitions for the `/shifts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::shifts;
use crate::state::AppState;

/// Routes mounted at `/shifts`.
///
/// ```text
/// GET /            -> own_finished_shifts
/// GET /{user_id}   -> finished_shifts_by_user (manager)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(shifts::own_finished_shifts))
        .route("/{user_id}", get(shifts::finished_shifts_by_user))
}
