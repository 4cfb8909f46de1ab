//! Handlers for the `/timestamps` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use timeclock_core::error::CoreError;
use timeclock_core::roles::ROLE_MANAGER;
use timeclock_core::types::DbId;
use timeclock_db::models::stamp::{CreateStamp, Stamp, UpdateStamp};
use timeclock_db::repositories::StampRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{require_precedence, RequireManager};
use crate::state::AppState;

/// POST /api/v1/timestamps
///
/// Record a new stamp for the authenticated user. The transition is
/// validated against the persisted latest stamp inside the repository's
/// create transaction; an illegal transition is a 400, never a partial
/// write. `stamp_time` defaults to "now" when the client omits it.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateStamp>,
) -> AppResult<(StatusCode, Json<Stamp>)> {
    let stamp_time = input.stamp_time.unwrap_or_else(Utc::now);
    let stamp = StampRepo::create(&state.pool, user.user_id, input.stamp_type, stamp_time).await?;
    Ok((StatusCode::CREATED, Json(stamp)))
}

/// GET /api/v1/timestamps/latest
///
/// The authenticated user's most recent stamp, or JSON `null` when the user
/// has no stamps yet.
pub async fn latest(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Option<Stamp>>> {
    let stamp = StampRepo::latest(&state.pool, user.user_id).await?;
    Ok(Json(stamp))
}

/// GET /api/v1/timestamps/{id}
///
/// Owners may read their own stamps; reading someone else's requires
/// manager precedence.
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Stamp>> {
    let stamp = StampRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Stamp", id }))?;

    if stamp.user_id != user.user_id {
        require_precedence(&state.pool, &user, ROLE_MANAGER).await?;
    }

    Ok(Json(stamp))
}

/// PATCH /api/v1/timestamps/{id}
///
/// Optimistic-versioned correction of an existing stamp (manager+). The
/// edited stamp is not re-validated against its neighbors in the sequence.
/// A stale version and a missing id are indistinguishable to the
/// compare-and-swap; both report 404.
pub async fn update(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStamp>,
) -> AppResult<Json<Stamp>> {
    let stamp = StampRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Stamp", id }))?;
    Ok(Json(stamp))
}

/// DELETE /api/v1/timestamps/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = StampRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Stamp", id }))
    }
}
