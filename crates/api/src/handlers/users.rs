//! Handlers for the `/users` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use timeclock_core::error::CoreError;
use timeclock_core::types::DbId;
use timeclock_db::models::stamp::Stamp;
use timeclock_db::models::user::{UpdateUser, User, UserResponse};
use timeclock_db::repositories::{RoleRepo, StampRepo, UserRepo};

use crate::auth::tokens::hash_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::query::FeedParams;
use crate::state::AppState;

async fn to_response(state: &AppState, user: User) -> AppResult<UserResponse> {
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(UserResponse::from_user(user, role))
}

/// GET /api/v1/users/me
pub async fn me(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(to_response(&state, user).await?))
}

/// GET /api/v1/users (manager+)
pub async fn list(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;

    let mut responses = Vec::with_capacity(users.len());
    for user in users {
        responses.push(to_response(&state, user).await?);
    }
    Ok(Json(responses))
}

/// GET /api/v1/users/{id} (manager+)
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(to_response(&state, user).await?))
}

/// PATCH /api/v1/users/{id} (manager+)
pub async fn update(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(to_response(&state, user).await?))
}

/// DELETE /api/v1/users/{id} (manager+)
pub async fn delete(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = UserRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

/// PUT /api/v1/users/activate/{token}
///
/// Activate an account with an emailed invitation token. Public: the token
/// itself is the credential.
pub async fn activate(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<StatusCode> {
    let activated = UserRepo::activate_by_token(&state.pool, &hash_token(&token)).await?;
    if !activated {
        return Err(AppError::NotFound(
            "Invalid or expired activation token".into(),
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/feed
///
/// A time-ordered page of the authenticated user's own stamps.
pub async fn feed(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<FeedParams>,
) -> AppResult<Json<Vec<Stamp>>> {
    let stamps = StampRepo::feed(
        &state.pool,
        auth_user.user_id,
        params.limit(),
        params.offset(),
        params.sort(),
    )
    .await?;
    Ok(Json(stamps))
}
