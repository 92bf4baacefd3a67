//! Handlers for the `/lots` resource.
//!
//! Staff and partners browse the whole catalogue; a buyer only sees the
//! lots assigned to them. Writes are staff only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use yam_core::lot::{validate_lot_status, validate_price_cents};
use yam_core::types::DbId;
use yam_core::validation::require_non_empty;
use yam_db::models::lot::{CreateLot, Lot, LotFilter, UpdateLot};
use yam_db::repositories::LotRepo;
use yam_events::ChangeEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

const TABLE: &str = "lots";

/// POST /api/v1/lots
pub async fn create(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateLot>,
) -> AppResult<(StatusCode, Json<Lot>)> {
    require_non_empty("reference", &input.reference)?;
    validate_price_cents(input.prix_cents)?;
    if let Some(statut) = input.statut.as_deref() {
        validate_lot_status(statut)?;
    }
    let lot = LotRepo::create(&state.pool, &input).await?;
    state.notify(ChangeEvent::inserted(TABLE, lot.id));
    Ok((StatusCode::CREATED, Json(lot)))
}

/// GET /api/v1/lots?statut=&residence_id=&partenaire_id=
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<LotFilter>,
) -> AppResult<Json<Vec<Lot>>> {
    if let Some(statut) = filter.statut.as_deref() {
        validate_lot_status(statut)?;
    }

    if !auth.is_staff() && auth.partenaire_id.is_none() {
        let Some(acquereur_id) = auth.acquereur_id else {
            return Ok(Json(Vec::new()));
        };
        let lots = LotRepo::list_for_acquereur(&state.pool, acquereur_id).await?;
        return Ok(Json(lots));
    }

    let lots = LotRepo::list_filtered(&state.pool, &filter).await?;
    Ok(Json(lots))
}

/// GET /api/v1/lots/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Lot>> {
    let lot = LotRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Lot", id))?;

    let buyer_only = !auth.is_staff() && auth.partenaire_id.is_none();
    if buyer_only && (auth.acquereur_id.is_none() || lot.acquereur_id != auth.acquereur_id) {
        return Err(AppError::not_found("Lot", id));
    }
    Ok(Json(lot))
}

/// PUT /api/v1/lots/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLot>,
) -> AppResult<Json<Lot>> {
    if let Some(statut) = input.statut.as_deref() {
        validate_lot_status(statut)?;
    }
    if let Some(price) = input.prix_cents {
        validate_price_cents(price)?;
    }
    let lot = LotRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Lot", id))?;
    state.notify(ChangeEvent::updated(TABLE, id));
    Ok(Json(lot))
}

/// DELETE /api/v1/lots/{id}
pub async fn delete(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !LotRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Lot", id));
    }
    state.notify(ChangeEvent::deleted(TABLE, id));
    Ok(StatusCode::NO_CONTENT)
}
