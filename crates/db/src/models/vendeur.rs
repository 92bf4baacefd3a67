//! Vendeur (seller) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yam_core::types::{DbId, Timestamp};

/// A row from the `vendeurs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vendeur {
    pub id: DbId,
    pub nom: String,
    pub prenom: Option<String>,
    pub societe: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVendeur {
    pub nom: String,
    pub prenom: Option<String>,
    pub societe: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVendeur {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub societe: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
}
