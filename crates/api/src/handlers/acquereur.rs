//! Handlers for the `/acquereurs` resource.
//!
//! Staff see every buyer. A partner sees and creates only the buyers they
//! brought; a buyer sees only their own record.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use yam_core::types::DbId;
use yam_core::validation::{normalize_email, require_non_empty};
use yam_db::models::acquereur::{Acquereur, CreateAcquereur, UpdateAcquereur};
use yam_db::repositories::AcquereurRepo;
use yam_events::ChangeEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

const TABLE: &str = "acquereurs";

/// Load a buyer and check the caller may see it.
pub(crate) async fn load_accessible(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
) -> AppResult<Acquereur> {
    let acquereur = AcquereurRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Acquereur", id))?;
    auth.ensure_acquereur_access(acquereur.id, acquereur.partenaire_id)?;
    Ok(acquereur)
}

/// POST /api/v1/acquereurs
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateAcquereur>,
) -> AppResult<(StatusCode, Json<Acquereur>)> {
    if !auth.is_staff() {
        let Some(partenaire_id) = auth.partenaire_id else {
            return Err(AppError::forbidden("Only staff and partners may create buyers"));
        };
        input.partenaire_id = Some(partenaire_id);
    }
    require_non_empty("nom", &input.nom)?;
    require_non_empty("prenom", &input.prenom)?;
    if let Some(email) = input.email.as_deref() {
        input.email = Some(normalize_email(email)?);
    }

    let acquereur = AcquereurRepo::create(&state.pool, &input).await?;
    state.notify(ChangeEvent::inserted(TABLE, acquereur.id));
    Ok((StatusCode::CREATED, Json(acquereur)))
}

/// GET /api/v1/acquereurs
pub async fn list(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<Vec<Acquereur>>> {
    if auth.is_staff() {
        return Ok(Json(AcquereurRepo::list(&state.pool, None).await?));
    }
    if let Some(partenaire_id) = auth.partenaire_id {
        return Ok(Json(AcquereurRepo::list(&state.pool, Some(partenaire_id)).await?));
    }
    match auth.acquereur_id {
        Some(id) => {
            let own = AcquereurRepo::find_by_id(&state.pool, id).await?;
            Ok(Json(own.into_iter().collect()))
        }
        None => Ok(Json(Vec::new())),
    }
}

/// GET /api/v1/acquereurs/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Acquereur>> {
    Ok(Json(load_accessible(&state, &auth, id).await?))
}

/// PUT /api/v1/acquereurs/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateAcquereur>,
) -> AppResult<Json<Acquereur>> {
    if let Some(email) = input.email.as_deref() {
        input.email = Some(normalize_email(email)?);
    }
    let acquereur = AcquereurRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Acquereur", id))?;
    state.notify(ChangeEvent::updated(TABLE, id));
    Ok(Json(acquereur))
}

/// DELETE /api/v1/acquereurs/{id}
pub async fn delete(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !AcquereurRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Acquereur", id));
    }
    state.notify(ChangeEvent::deleted(TABLE, id));
    Ok(StatusCode::NO_CONTENT)
}
