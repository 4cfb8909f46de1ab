//! Role-precedence authorization extractors.
//!
//! Roles carry a numeric level (seeded by migration); a caller satisfies a
//! gate when their role's level is at least the required role's level, so a
//! manager gate also admits admins. The extractor wraps [`AuthUser`] and
//! rejects requests below the required level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use timeclock_core::error::CoreError;
use timeclock_core::roles::ROLE_MANAGER;
use timeclock_db::repositories::RoleRepo;
use timeclock_db::DbPool;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Check that `user`'s role has at least the precedence of `required_role`.
///
/// Both roles are resolved from the roles table; a caller role missing from
/// the table is a data-integrity failure, not a client error. Exported for
/// handlers that gate on ownership-or-precedence (e.g. reading another
/// user's stamp).
pub async fn require_precedence(
    pool: &DbPool,
    user: &AuthUser,
    required_role: &str,
) -> Result<(), AppError> {
    let caller = RoleRepo::find_by_name(pool, &user.role)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("Unknown caller role '{}'", user.role))
        })?;

    let required = RoleRepo::find_by_name(pool, required_role)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("Unknown required role '{required_role}'"))
        })?;

    if caller.level < required.level {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "{required_role} role required"
        ))));
    }

    Ok(())
}

/// Requires `manager` precedence or better. Rejects with 403 Forbidden
/// otherwise.
///
/// ```ignore
/// async fn manager_only(RequireManager(user): RequireManager) -> AppResult<Json<()>> {
///     // user is guaranteed manager precedence here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require_precedence(&state.pool, &user, ROLE_MANAGER).await?;
        Ok(RequireManager(user))
    }
}
