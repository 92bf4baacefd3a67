//! Access gate for scheduled endpoints.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use yam_core::error::CoreError;

use super::auth::authenticate;
use crate::error::AppError;
use crate::router::CRON_SECRET_HEADER;
use crate::state::AppState;

/// Who triggered a scheduled endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CronCaller {
    /// The external scheduler, authenticated by `x-cron-secret`.
    Scheduler,
    /// An admin triggering the job by hand.
    Admin,
}

impl FromRequestParts<AppState> for CronCaller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let (Some(expected), Some(given)) = (
            state.config.cron_secret.as_deref(),
            parts
                .headers
                .get(CRON_SECRET_HEADER)
                .and_then(|v| v.to_str().ok()),
        ) {
            if given == expected {
                return Ok(CronCaller::Scheduler);
            }
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid cron secret".into(),
            )));
        }

        let user = authenticate(parts, state)?;
        if !user.is_admin() {
            return Err(AppError::forbidden("Admin role required"));
        }
        Ok(CronCaller::Admin)
    }
}
