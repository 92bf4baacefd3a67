//! User identity and profile models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yam_core::types::{DbId, Timestamp};

/// A row from the `users` table joined with its profile.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithProfile {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub nom: String,
    pub prenom: String,
    pub role_custom: String,
    pub partenaire_id: Option<DbId>,
    pub acquereur_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub nom: String,
    pub prenom: String,
    pub role_custom: String,
    pub partenaire_id: Option<DbId>,
    pub acquereur_id: Option<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<&UserWithProfile> for UserResponse {
    fn from(u: &UserWithProfile) -> Self {
        Self {
            id: u.id,
            email: u.email.clone(),
            nom: u.nom.clone(),
            prenom: u.prenom.clone(),
            role_custom: u.role_custom.clone(),
            partenaire_id: u.partenaire_id,
            acquereur_id: u.acquereur_id,
            is_active: u.is_active,
            created_at: u.created_at,
        }
    }
}

/// DTO for creating an identity plus its profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub nom: String,
    pub prenom: String,
    pub role_custom: String,
    pub partenaire_id: Option<DbId>,
    pub acquereur_id: Option<DbId>,
}
