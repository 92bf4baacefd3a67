//! Lot option (time-boxed hold) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yam_core::types::{DbId, Timestamp};

/// A row from the `lot_options` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LotOption {
    pub id: DbId,
    pub lot_id: DbId,
    pub partenaire_id: Option<DbId>,
    pub client_nom: Option<String>,
    /// One of `active`, `expiree`, `convertie`, `annulee`.
    pub statut: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for placing an option on a lot.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOption {
    pub partenaire_id: Option<DbId>,
    pub client_nom: Option<String>,
    /// Hold duration in days; defaults to 7, at most 30.
    pub duration_days: Option<i64>,
}

/// Counts returned by the `expire_stale_options()` stored procedure.
#[derive(Debug, Clone, Copy, FromRow, Serialize, PartialEq, Eq)]
pub struct ExpiryResult {
    pub expired_options: i64,
    pub released_lots: i64,
}

/// An option joined with the lot, residence and partner it concerns.
/// Used to build option notification emails.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OptionDetails {
    pub id: DbId,
    pub lot_id: DbId,
    pub statut: String,
    pub expires_at: Timestamp,
    pub client_nom: Option<String>,
    pub lot_reference: String,
    pub residence_nom: String,
    pub partenaire_id: Option<DbId>,
    pub partenaire_nom: Option<String>,
    pub partenaire_email: Option<String>,
}

/// Request body for converting an option into a reservation.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertOption {
    pub acquereur_id: DbId,
}
