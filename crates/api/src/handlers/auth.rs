//! Handlers for the `/authentication` resource (register, login, password
//! management).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use timeclock_core::error::CoreError;
use timeclock_core::roles::ROLE_USER;
use timeclock_db::models::user::{CreateUser, UserResponse};
use timeclock_db::repositories::{RoleRepo, UserRepo};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::auth::tokens::{generate_one_shot_token, hash_token};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /authentication/user`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 72))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub last_name: String,
}

/// Response body for a successful registration.
///
/// Carries the plaintext activation token so a frontend without a mail
/// inbox (development, tests) can complete the flow.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Request body for `POST /authentication/token`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Request body for `PATCH /users/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordPayload {
    pub current_password: String,
    pub new_password: String,
}

/// Request body for `POST /authentication/request-password-reset`.
#[derive(Debug, Deserialize, Validate)]
pub struct RequestPasswordResetPayload {
    #[validate(email)]
    pub email: String,
}

/// Request body for `PUT /authentication/reset-password/{token}`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordPayload {
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/authentication/user
///
/// Register a new account. The user starts inactive; an activation link is
/// emailed. If the email cannot be sent the freshly created user is rolled
/// back so registration can be retried.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterPayload>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    // 1. Validate the payload shape, then the password strength.
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    validate_password_strength(&input.password).map_err(AppError::BadRequest)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // 2. New accounts always get the base role.
    let role = RoleRepo::find_by_name(&state.pool, ROLE_USER)
        .await?
        .ok_or_else(|| AppError::InternalError("Base role missing from roles table".into()))?;

    // 3. Create the user and its hashed invitation token in one transaction.
    //    A duplicate email surfaces as a unique violation (409).
    let (plain_token, token_hash) = generate_one_shot_token();
    let expires_at = Utc::now() + Duration::days(state.config.mail.invitation_expiry_days);

    let user = UserRepo::create_and_invite(
        &state.pool,
        &CreateUser {
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            password_hash,
            role_id: role.id,
        },
        &token_hash,
        expires_at,
    )
    .await?;

    // 4. Send the activation email. On failure, roll the user back (saga)
    //    so the address is free to register again.
    let activation_url = format!("{}/confirm/{plain_token}", state.config.frontend_url);
    if let Err(err) = state.mailer.send_invitation(&user.email, &activation_url).await {
        tracing::error!(error = %err, user_id = user.id, "failed to send invitation email");

        if let Err(del_err) = UserRepo::delete(&state.pool, user.id).await {
            tracing::error!(error = %del_err, user_id = user.id, "failed to roll back user");
        }

        return Err(AppError::InternalError(
            "Could not send the activation email".into(),
        ));
    }

    let response = RegisterResponse {
        user: UserResponse::from_user(user, role.name),
        token: plain_token,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/authentication/token
///
/// Authenticate with email + password on an activated account. Returns an
/// access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginPayload>,
) -> AppResult<Json<TokenResponse>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    // 1. Find the user; indistinguishable error for unknown email and bad
    //    password.
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    // 2. Unactivated accounts cannot log in.
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is not activated".into(),
        )));
    }

    // 3. Verify the password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    // 4. Issue the token with the resolved role name in the claims.
    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    let access_token = generate_access_token(user.id, &role_name, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(TokenResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from_user(user, role_name),
    }))
}

/// PATCH /api/v1/users/change-password
///
/// Change the authenticated user's password after re-verifying the current
/// one.
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChangePasswordPayload>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password).map_err(AppError::BadRequest)?;

    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::change_password(&state.pool, user.id, &new_hash).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/authentication/request-password-reset
///
/// Always answers 202 so the endpoint does not reveal which addresses have
/// accounts. When the address matches, a reset link is stored and emailed.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(input): Json<RequestPasswordResetPayload>,
) -> AppResult<StatusCode> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if let Some(user) = UserRepo::find_by_email(&state.pool, &input.email).await? {
        let (plain_token, token_hash) = generate_one_shot_token();
        let expires_at = Utc::now() + Duration::minutes(state.config.mail.reset_expiry_mins);

        UserRepo::store_reset_token(&state.pool, user.id, &token_hash, expires_at).await?;

        let reset_url = format!("{}/reset-password/{plain_token}", state.config.frontend_url);
        if let Err(err) = state.mailer.send_password_reset(&user.email, &reset_url).await {
            // The token stays stored; the user can request again.
            tracing::error!(error = %err, user_id = user.id, "failed to send reset email");
            return Err(AppError::InternalError(
                "Could not send the password reset email".into(),
            ));
        }
    }

    Ok(StatusCode::ACCEPTED)
}

/// PUT /api/v1/authentication/reset-password/{token}
///
/// Set a new password using an emailed reset token. The token is consumed
/// on success.
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(input): Json<ResetPasswordPayload>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.password).map_err(AppError::BadRequest)?;

    let new_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let reset = UserRepo::reset_password_by_token(&state.pool, &hash_token(&token), &new_hash).await?;
    if !reset {
        return Err(AppError::NotFound("Invalid or expired reset token".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}
