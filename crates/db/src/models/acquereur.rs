//! Acquéreur (buyer) entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yam_core::types::{DbId, Timestamp};

/// A row from the `acquereurs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Acquereur {
    pub id: DbId,
    pub nom: String,
    pub prenom: String,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub date_naissance: Option<NaiveDate>,
    pub partenaire_id: Option<DbId>,
    /// Portal login linked by `create-user`, if any.
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAcquereur {
    pub nom: String,
    pub prenom: String,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub date_naissance: Option<NaiveDate>,
    pub partenaire_id: Option<DbId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAcquereur {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub date_naissance: Option<NaiveDate>,
    pub partenaire_id: Option<DbId>,
}
