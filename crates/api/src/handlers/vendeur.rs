//! Handlers for the `/vendeurs` resource. Staff only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use yam_core::types::DbId;
use yam_core::validation::require_non_empty;
use yam_db::models::vendeur::{CreateVendeur, UpdateVendeur, Vendeur};
use yam_db::repositories::VendeurRepo;
use yam_events::ChangeEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

const TABLE: &str = "vendeurs";

/// POST /api/v1/vendeurs
pub async fn create(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateVendeur>,
) -> AppResult<(StatusCode, Json<Vendeur>)> {
    require_non_empty("nom", &input.nom)?;
    let vendeur = VendeurRepo::create(&state.pool, &input).await?;
    state.notify(ChangeEvent::inserted(TABLE, vendeur.id));
    Ok((StatusCode::CREATED, Json(vendeur)))
}

/// GET /api/v1/vendeurs
pub async fn list(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Vendeur>>> {
    Ok(Json(VendeurRepo::list(&state.pool).await?))
}

/// GET /api/v1/vendeurs/{id}
pub async fn get_by_id(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vendeur>> {
    let vendeur = VendeurRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Vendeur", id))?;
    Ok(Json(vendeur))
}

/// PUT /api/v1/vendeurs/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVendeur>,
) -> AppResult<Json<Vendeur>> {
    let vendeur = VendeurRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Vendeur", id))?;
    state.notify(ChangeEvent::updated(TABLE, id));
    Ok(Json(vendeur))
}

/// DELETE /api/v1/vendeurs/{id}
pub async fn delete(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !VendeurRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Vendeur", id));
    }
    state.notify(ChangeEvent::deleted(TABLE, id));
    Ok(StatusCode::NO_CONTENT)
}
