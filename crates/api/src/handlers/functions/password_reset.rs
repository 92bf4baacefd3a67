//! Password reset by emailed single-use token.
//!
//! `send-password-reset` never reveals whether an address has an account,
//! and `reset-password-with-token` answers every unusable token with the
//! same error.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use yam_core::password_reset::{
    check_token_usable, expires_at, generate_token, hash_token, invalid_token,
    validate_new_password,
};
use yam_core::templates::PASSWORD_RESET;
use yam_core::validation::normalize_email;
use yam_db::repositories::{PasswordResetRepo, UserRepo};
use yam_events::{MailTransport, OutgoingEmail};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::response::SuccessResponse;
use crate::state::AppState;

const RESET_REQUESTED_MESSAGE: &str =
    "If an account exists for this email, a reset link has been sent";

#[derive(Debug, Deserialize)]
pub struct SendResetRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetWithTokenRequest {
    pub token: String,
    #[serde(rename = "newPassword", alias = "new_password")]
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct Acknowledgement {
    pub message: &'static str,
}

/// POST /functions/send-password-reset
pub async fn send_password_reset(
    State(state): State<AppState>,
    Json(input): Json<SendResetRequest>,
) -> AppResult<Json<SuccessResponse<Acknowledgement>>> {
    let email = normalize_email(&input.email)?;

    match UserRepo::find_by_email(&state.pool, &email).await? {
        Some(user) if user.is_active => {
            let token = generate_token();
            PasswordResetRepo::create(
                &state.pool,
                user.id,
                &hash_token(&token),
                expires_at(Utc::now()),
            )
            .await?;

            let rendered =
                PASSWORD_RESET.render(&json!({ "reset_link": state.config.reset_link(&token) }));
            match state.mailer.send(&OutgoingEmail::new(&user.email, rendered)).await {
                Ok(()) => tracing::info!(user_id = user.id, "Password reset email sent"),
                Err(e) => {
                    tracing::error!(user_id = user.id, error = %e, "Password reset email failed")
                }
            }
        }
        Some(user) => tracing::info!(user_id = user.id, "Password reset ignored for inactive user"),
        None => tracing::debug!("Password reset requested for unknown email"),
    }

    Ok(Json(SuccessResponse::new(Acknowledgement {
        message: RESET_REQUESTED_MESSAGE,
    })))
}

/// POST /functions/reset-password-with-token
pub async fn reset_password_with_token(
    State(state): State<AppState>,
    Json(input): Json<ResetWithTokenRequest>,
) -> AppResult<Json<SuccessResponse<Acknowledgement>>> {
    validate_new_password(&input.new_password)?;

    let token = PasswordResetRepo::find_by_hash(&state.pool, &hash_token(input.token.trim()))
        .await?
        .ok_or_else(invalid_token)?;
    check_token_usable(token.expires_at, token.used_at, Utc::now())?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    if !PasswordResetRepo::redeem(&state.pool, token.id, token.user_id, &password_hash).await? {
        return Err(invalid_token().into());
    }

    tracing::info!(user_id = token.user_id, "Password reset with token");
    Ok(Json(SuccessResponse::new(Acknowledgement {
        message: "Password updated",
    })))
}
