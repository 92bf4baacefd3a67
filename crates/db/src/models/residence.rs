//! Residence entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yam_core::types::{DbId, Timestamp};

/// A row from the `residences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Residence {
    pub id: DbId,
    pub nom: String,
    pub adresse: Option<String>,
    pub ville: Option<String>,
    pub code_postal: Option<String>,
    pub description: Option<String>,
    pub date_livraison_prevue: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new residence.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResidence {
    pub nom: String,
    pub adresse: Option<String>,
    pub ville: Option<String>,
    pub code_postal: Option<String>,
    pub description: Option<String>,
    pub date_livraison_prevue: Option<NaiveDate>,
}

/// DTO for updating a residence. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResidence {
    pub nom: Option<String>,
    pub adresse: Option<String>,
    pub ville: Option<String>,
    pub code_postal: Option<String>,
    pub description: Option<String>,
    pub date_livraison_prevue: Option<NaiveDate>,
}
