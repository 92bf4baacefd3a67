//! Handlers for construction milestones of a (lot, buyer) pair.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use yam_core::error::CoreError;
use yam_core::milestone::{compute_progress, MilestoneStatus, Progress};
use yam_core::types::DbId;
use yam_db::models::milestone::{MilestoneStep, ValidateStep};
use yam_db::repositories::{LotRepo, MilestoneRepo};
use yam_events::ChangeEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::acquereur::load_accessible;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

const TABLE: &str = "milestone_steps";

/// GET /api/v1/acquereurs/{id}/lots/{lot_id}/milestones
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((acquereur_id, lot_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Vec<MilestoneStep>>> {
    load_accessible(&state, &auth, acquereur_id).await?;
    let steps = MilestoneRepo::list_for(&state.pool, lot_id, acquereur_id).await?;
    Ok(Json(steps))
}

/// POST /api/v1/acquereurs/{id}/lots/{lot_id}/milestones
///
/// Creates the ten default steps. The lot must be assigned to the buyer; a
/// second call for the same pair answers 409.
pub async fn create_defaults(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path((acquereur_id, lot_id)): Path<(DbId, DbId)>,
) -> AppResult<(StatusCode, Json<Vec<MilestoneStep>>)> {
    let lot = LotRepo::find_by_id(&state.pool, lot_id)
        .await?
        .ok_or_else(|| AppError::not_found("Lot", lot_id))?;
    if lot.acquereur_id != Some(acquereur_id) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Lot {lot_id} is not assigned to acquereur {acquereur_id}"
        ))));
    }

    let steps = MilestoneRepo::create_default_steps(&state.pool, lot_id, acquereur_id).await?;
    tracing::info!(lot_id, acquereur_id, count = steps.len(), "Milestone steps created");
    state.notify(ChangeEvent::bulk_update(TABLE));
    Ok((StatusCode::CREATED, Json(steps)))
}

/// GET /api/v1/acquereurs/{id}/lots/{lot_id}/milestones/progress
///
/// `data` is `null` when the pair has no steps yet.
pub async fn progress(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((acquereur_id, lot_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Option<Progress>>>> {
    load_accessible(&state, &auth, acquereur_id).await?;
    let steps = MilestoneRepo::list_for(&state.pool, lot_id, acquereur_id).await?;
    let progress = compute_progress(steps.iter().map(MilestoneStep::parsed_status));
    Ok(Json(DataResponse { data: progress }))
}

/// POST /api/v1/milestones/{id}/validate
pub async fn validate(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<Json<ValidateStep>>,
) -> AppResult<Json<MilestoneStep>> {
    let current = load_step(&state, id).await?;
    warn_if_backward(&current, MilestoneStatus::Validated);

    let notes = body.and_then(|Json(b)| b.notes);
    let step = MilestoneRepo::validate_by_staff(&state.pool, id, staff.user_id, notes.as_deref())
        .await?
        .ok_or_else(|| AppError::not_found("MilestoneStep", id))?;
    state.notify(ChangeEvent::updated(TABLE, id));
    Ok(Json(step))
}

/// POST /api/v1/milestones/{id}/complete
pub async fn complete(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MilestoneStep>> {
    let current = load_step(&state, id).await?;
    warn_if_backward(&current, MilestoneStatus::Completed);

    let step = MilestoneRepo::mark_complete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("MilestoneStep", id))?;
    state.notify(ChangeEvent::updated(TABLE, id));
    Ok(Json(step))
}

async fn load_step(state: &AppState, id: DbId) -> AppResult<MilestoneStep> {
    MilestoneRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("MilestoneStep", id))
}

/// Transitions are never rejected; going backwards is only logged.
fn warn_if_backward(step: &MilestoneStep, next: MilestoneStatus) {
    let current = step.parsed_status();
    if !current.is_forward_transition(next) {
        tracing::warn!(
            step_id = step.id,
            from = current.as_str(),
            to = next.as_str(),
            "Milestone step moved backwards"
        );
    }
}
