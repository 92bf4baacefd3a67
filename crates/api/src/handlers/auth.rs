//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use yam_core::error::CoreError;
use yam_core::validation::normalize_email;
use yam_db::models::user::{UserResponse, UserWithProfile};
use yam_db::repositories::UserRepo;

use crate::auth::jwt::{generate_access_token, TokenSubject};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

/// Issue an access token for an already authenticated user.
pub(crate) fn issue_token(state: &AppState, user: &UserWithProfile) -> AppResult<String> {
    let subject = TokenSubject {
        user_id: user.id,
        role: &user.role_custom,
        acquereur_id: user.acquereur_id,
        partenaire_id: user.partenaire_id,
    };
    generate_access_token(&subject, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = normalize_email(&input.email).map_err(|_| invalid_credentials())?;

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !user.is_active {
        return Err(AppError::forbidden("Account is deactivated"));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Failed login attempt");
        return Err(invalid_credentials());
    }

    UserRepo::record_login(&state.pool, user.id).await?;
    let access_token = issue_token(&state, &user)?;
    tracing::info!(user_id = user.id, role = %user.role_custom, "User logged in");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(&user),
    }))
}

/// GET /api/v1/auth/me
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", auth.user_id))?;
    Ok(Json(UserResponse::from(&user)))
}
