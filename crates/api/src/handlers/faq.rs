//! Handlers for the `/faqs` resource.
//!
//! Any authenticated user reads published entries; staff also see drafts
//! and are the only writers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use yam_core::types::DbId;
use yam_core::validation::require_non_empty;
use yam_db::models::faq::{CreateFaq, Faq, UpdateFaq};
use yam_db::repositories::FaqRepo;
use yam_events::ChangeEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

const TABLE: &str = "faqs";

/// POST /api/v1/faqs
pub async fn create(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateFaq>,
) -> AppResult<(StatusCode, Json<Faq>)> {
    require_non_empty("question", &input.question)?;
    require_non_empty("reponse", &input.reponse)?;
    let faq = FaqRepo::create(&state.pool, &input).await?;
    state.notify(ChangeEvent::inserted(TABLE, faq.id));
    Ok((StatusCode::CREATED, Json(faq)))
}

/// GET /api/v1/faqs
pub async fn list(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<Vec<Faq>>> {
    let faqs = FaqRepo::list(&state.pool, auth.is_staff()).await?;
    Ok(Json(faqs))
}

/// GET /api/v1/faqs/{id}
///
/// Drafts are reported as missing to non-staff callers.
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Faq>> {
    let faq = FaqRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|f| f.is_published || auth.is_staff())
        .ok_or_else(|| AppError::not_found("Faq", id))?;
    Ok(Json(faq))
}

/// PUT /api/v1/faqs/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFaq>,
) -> AppResult<Json<Faq>> {
    let faq = FaqRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Faq", id))?;
    state.notify(ChangeEvent::updated(TABLE, id));
    Ok(Json(faq))
}

/// DELETE /api/v1/faqs/{id}
pub async fn delete(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !FaqRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Faq", id));
    }
    state.notify(ChangeEvent::deleted(TABLE, id));
    Ok(StatusCode::NO_CONTENT)
}
