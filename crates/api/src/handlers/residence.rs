//! Handlers for the `/residences` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use yam_core::types::DbId;
use yam_core::validation::require_non_empty;
use yam_db::models::residence::{CreateResidence, Residence, UpdateResidence};
use yam_db::repositories::ResidenceRepo;
use yam_events::ChangeEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

const TABLE: &str = "residences";

/// POST /api/v1/residences
pub async fn create(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateResidence>,
) -> AppResult<(StatusCode, Json<Residence>)> {
    require_non_empty("nom", &input.nom)?;
    let residence = ResidenceRepo::create(&state.pool, &input).await?;
    state.notify(ChangeEvent::inserted(TABLE, residence.id));
    Ok((StatusCode::CREATED, Json(residence)))
}

/// GET /api/v1/residences
pub async fn list(_auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<Vec<Residence>>> {
    let residences = ResidenceRepo::list(&state.pool).await?;
    Ok(Json(residences))
}

/// GET /api/v1/residences/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Residence>> {
    let residence = ResidenceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Residence", id))?;
    Ok(Json(residence))
}

/// PUT /api/v1/residences/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateResidence>,
) -> AppResult<Json<Residence>> {
    let residence = ResidenceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Residence", id))?;
    state.notify(ChangeEvent::updated(TABLE, id));
    Ok(Json(residence))
}

/// DELETE /api/v1/residences/{id}
pub async fn delete(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ResidenceRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Residence", id));
    }
    state.notify(ChangeEvent::deleted(TABLE, id));
    Ok(StatusCode::NO_CONTENT)
}
