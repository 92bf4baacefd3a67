//! Partenaire (commission-earning intermediary) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yam_core::types::{DbId, Timestamp};

/// A row from the `partenaires` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Partenaire {
    pub id: DbId,
    pub nom: String,
    pub societe: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    /// Commission rate in basis points (500 = 5%).
    pub commission_bps: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePartenaire {
    pub nom: String,
    pub societe: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    /// Defaults to 0 if omitted.
    pub commission_bps: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePartenaire {
    pub nom: Option<String>,
    pub societe: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub commission_bps: Option<i32>,
}
