//! Handlers for the `/shifts` resource.
//!
//! Shifts are derived on demand: the handler loads the user's full stamp
//! sequence in ascending time order and folds it. Nothing is persisted.

use axum::extract::{Path, State};
use axum::Json;
use timeclock_core::shift::{fold_shifts, Shift};
use timeclock_core::types::DbId;
use timeclock_db::repositories::StampRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::state::AppState;

/// GET /api/v1/shifts
///
/// The authenticated user's finished shifts. Open shifts (a sign-in without
/// its sign-out yet) are not included.
pub async fn own_finished_shifts(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Shift>>> {
    let stamps = StampRepo::stamps_ascending(&state.pool, user.user_id).await?;
    Ok(Json(fold_shifts(&stamps)))
}

/// GET /api/v1/shifts/{user_id}
///
/// Finished shifts for any user (manager+). A user with no stamps yields an
/// empty list.
pub async fn finished_shifts_by_user(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<Shift>>> {
    let stamps = StampRepo::stamps_ascending(&state.pool, user_id).await?;
    Ok(Json(fold_shifts(&stamps)))
}
