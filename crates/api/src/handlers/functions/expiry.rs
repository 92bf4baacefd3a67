//! `POST /functions/expire-options-cron`

use axum::extract::State;
use axum::Json;
use yam_db::models::lot_option::ExpiryResult;

use crate::background::option_expiry::expire_once;
use crate::error::AppResult;
use crate::middleware::cron::CronCaller;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Expire overdue options and release their lots. Returns the counts.
pub async fn expire_options(
    caller: CronCaller,
    State(state): State<AppState>,
) -> AppResult<Json<SuccessResponse<ExpiryResult>>> {
    let result = expire_once(&state.pool, &state.event_bus).await?;
    tracing::info!(
        ?caller,
        expired = result.expired_options,
        released = result.released_lots,
        "Options expired"
    );
    Ok(Json(SuccessResponse::new(result)))
}
