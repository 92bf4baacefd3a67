//! `POST /functions/create-user`

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use yam_core::error::CoreError;
use yam_core::password_reset::validate_new_password;
use yam_core::roles::{validate_role, ROLE_ACQUEREUR, ROLE_PARTENAIRE};
use yam_core::types::DbId;
use yam_core::validation::{normalize_email, require_non_empty};
use yam_db::models::user::{CreateUser, UserResponse};
use yam_db::repositories::UserRepo;
use yam_events::ChangeEvent;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::SuccessResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub nom: String,
    pub prenom: String,
    pub role_custom: String,
    pub partenaire_id: Option<DbId>,
    pub acquereur_id: Option<DbId>,
}

#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub user: UserResponse,
}

/// Check field formats and that portal roles point at their record.
fn validate_request(input: &CreateUserRequest) -> Result<String, CoreError> {
    let email = normalize_email(&input.email)?;
    validate_new_password(&input.password)?;
    require_non_empty("nom", &input.nom)?;
    require_non_empty("prenom", &input.prenom)?;
    validate_role(&input.role_custom)?;

    if input.role_custom == ROLE_ACQUEREUR && input.acquereur_id.is_none() {
        return Err(CoreError::Validation(
            "acquereur_id is required for the acquereur role".into(),
        ));
    }
    if input.role_custom == ROLE_PARTENAIRE && input.partenaire_id.is_none() {
        return Err(CoreError::Validation(
            "partenaire_id is required for the partenaire role".into(),
        ));
    }
    Ok(email)
}

/// Store failures are reported as 400 with a readable message.
fn creation_error(err: sqlx::Error, input: &CreateUserRequest) -> AppError {
    match &err {
        sqlx::Error::RowNotFound => AppError::Core(CoreError::Validation(format!(
            "Acquereur {} does not exist",
            input.acquereur_id.unwrap_or_default()
        ))),
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            AppError::Core(CoreError::Validation(
                "A user with this email already exists".into(),
            ))
        }
        _ => AppError::Database(err),
    }
}

/// POST /functions/create-user
///
/// Creates a login, its profile and, for buyers, links the acquéreur record.
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<Json<SuccessResponse<CreatedUser>>> {
    let email = validate_request(&input)?;
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let create = CreateUser {
        email,
        password_hash,
        nom: input.nom.trim().to_string(),
        prenom: input.prenom.trim().to_string(),
        role_custom: input.role_custom.clone(),
        partenaire_id: input.partenaire_id,
        acquereur_id: input.acquereur_id,
    };
    let user = UserRepo::create_with_profile(&state.pool, &create)
        .await
        .map_err(|e| creation_error(e, &input))?;

    tracing::info!(
        user_id = user.id,
        role = %user.role_custom,
        created_by = admin.user_id,
        "User created"
    );
    state.notify(ChangeEvent::inserted("profiles", user.id));
    if let Some(acquereur_id) = user.acquereur_id {
        state.notify(ChangeEvent::updated("acquereurs", acquereur_id));
    }

    Ok(Json(SuccessResponse::new(CreatedUser {
        user: UserResponse::from(&user),
    })))
}
