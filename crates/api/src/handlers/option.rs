//! Handlers for lot options (time-boxed holds).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use yam_core::error::CoreError;
use yam_core::lot::option_duration_days;
use yam_core::types::DbId;
use yam_db::models::lot_option::{ConvertOption, LotOption, PlaceOption};
use yam_db::repositories::lot_option_repo::PlaceOutcome;
use yam_db::repositories::LotOptionRepo;
use yam_events::ChangeEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

const TABLE: &str = "lot_options";

/// POST /api/v1/lots/{id}/options
///
/// Staff may place an option for any partner; a partner always places it
/// in their own name.
pub async fn place(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(lot_id): Path<DbId>,
    Json(mut input): Json<PlaceOption>,
) -> AppResult<(StatusCode, Json<LotOption>)> {
    if !auth.is_staff() {
        let Some(partenaire_id) = auth.partenaire_id else {
            return Err(AppError::forbidden("Only staff and partners may place options"));
        };
        input.partenaire_id = Some(partenaire_id);
    }

    let days = option_duration_days(input.duration_days)?;
    let expires_at = Utc::now() + chrono::Duration::days(days);

    match LotOptionRepo::place(&state.pool, lot_id, &input, expires_at).await? {
        PlaceOutcome::Placed(option) => {
            tracing::info!(option_id = option.id, lot_id, days, "Option placed");
            state.notify(ChangeEvent::inserted(TABLE, option.id));
            state.notify(ChangeEvent::updated("lots", lot_id));
            Ok((StatusCode::CREATED, Json(option)))
        }
        PlaceOutcome::LotNotFound => Err(AppError::not_found("Lot", lot_id)),
        PlaceOutcome::LotUnavailable => Err(AppError::Core(CoreError::Conflict(format!(
            "Lot {lot_id} is not available"
        )))),
    }
}

/// GET /api/v1/options
///
/// Active options. A partner only sees their own.
pub async fn list_active(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LotOption>>> {
    let scope = if auth.is_staff() {
        None
    } else {
        Some(
            auth.partenaire_id
                .ok_or_else(|| AppError::forbidden("Only staff and partners may list options"))?,
        )
    };
    Ok(Json(LotOptionRepo::list_active(&state.pool, scope).await?))
}

/// POST /api/v1/options/{id}/cancel
pub async fn cancel(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<LotOption>> {
    let existing = LotOptionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("LotOption", id))?;
    let own_option =
        auth.partenaire_id.is_some() && existing.partenaire_id == auth.partenaire_id;
    if !auth.is_staff() && !own_option {
        return Err(AppError::forbidden("This option belongs to another partner"));
    }

    let option = LotOptionRepo::cancel(&state.pool, id)
        .await?
        .ok_or_else(|| inactive(id))?;
    state.notify(ChangeEvent::updated(TABLE, id));
    state.notify(ChangeEvent::updated("lots", option.lot_id));
    Ok(Json(option))
}

/// POST /api/v1/options/{id}/convert
pub async fn convert(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ConvertOption>,
) -> AppResult<Json<LotOption>> {
    if LotOptionRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::not_found("LotOption", id));
    }
    let option = LotOptionRepo::convert(&state.pool, id, input.acquereur_id)
        .await?
        .ok_or_else(|| inactive(id))?;
    tracing::info!(option_id = id, acquereur_id = input.acquereur_id, "Option converted");
    state.notify(ChangeEvent::updated(TABLE, id));
    state.notify(ChangeEvent::updated("lots", option.lot_id));
    Ok(Json(option))
}

fn inactive(id: DbId) -> AppError {
    AppError::Core(CoreError::Conflict(format!("Option {id} is no longer active")))
}
