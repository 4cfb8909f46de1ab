//! Route definitions for the `/timestamps` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::timestamps;
use crate::state::AppState;

/// Routes mounted at `/timestamps`.
///
/// ```text
/// POST   /          -> create
/// GET    /latest    -> latest
/// GET    /{id}      -> get_by_id (owner or manager)
/// PATCH  /{id}      -> update (manager)
/// DELETE /{id}      -> delete (manager)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(timestamps::create))
        .route("/latest", get(timestamps::latest))
        .route(
            "/{id}",
            get(timestamps::get_by_id)
                .patch(timestamps::update)
                .delete(timestamps::delete),
        )
}
