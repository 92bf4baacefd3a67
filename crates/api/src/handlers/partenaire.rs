//! Handlers for the `/partenaires` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use yam_core::error::CoreError;
use yam_core::types::DbId;
use yam_core::validation::require_non_empty;
use yam_db::models::partenaire::{CreatePartenaire, Partenaire, UpdatePartenaire};
use yam_db::repositories::PartenaireRepo;
use yam_events::ChangeEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

const TABLE: &str = "partenaires";

/// Commission rates are basis points, 0% to 100%.
const MAX_COMMISSION_BPS: i32 = 10_000;

fn validate_commission(bps: Option<i32>) -> Result<(), CoreError> {
    match bps {
        Some(v) if !(0..=MAX_COMMISSION_BPS).contains(&v) => Err(CoreError::Validation(format!(
            "commission_bps must be between 0 and {MAX_COMMISSION_BPS}"
        ))),
        _ => Ok(()),
    }
}

/// POST /api/v1/partenaires
pub async fn create(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreatePartenaire>,
) -> AppResult<(StatusCode, Json<Partenaire>)> {
    require_non_empty("nom", &input.nom)?;
    validate_commission(input.commission_bps)?;
    let partenaire = PartenaireRepo::create(&state.pool, &input).await?;
    state.notify(ChangeEvent::inserted(TABLE, partenaire.id));
    Ok((StatusCode::CREATED, Json(partenaire)))
}

/// GET /api/v1/partenaires
pub async fn list(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Partenaire>>> {
    Ok(Json(PartenaireRepo::list(&state.pool).await?))
}

/// GET /api/v1/partenaires/{id}
///
/// A partner may read their own record.
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Partenaire>> {
    auth.ensure_partenaire_access(id)?;
    let partenaire = PartenaireRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Partenaire", id))?;
    Ok(Json(partenaire))
}

/// PUT /api/v1/partenaires/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePartenaire>,
) -> AppResult<Json<Partenaire>> {
    validate_commission(input.commission_bps)?;
    let partenaire = PartenaireRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Partenaire", id))?;
    state.notify(ChangeEvent::updated(TABLE, id));
    Ok(Json(partenaire))
}

/// DELETE /api/v1/partenaires/{id}
pub async fn delete(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PartenaireRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Partenaire", id));
    }
    state.notify(ChangeEvent::deleted(TABLE, id));
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commission_bounds() {
        assert!(validate_commission(None).is_ok());
        assert!(validate_commission(Some(0)).is_ok());
        assert!(validate_commission(Some(10_000)).is_ok());
        assert!(validate_commission(Some(-1)).is_err());
        assert!(validate_commission(Some(10_001)).is_err());
    }
}
