//! Lot (unit) entity model, DTOs and listing filter.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use yam_core::types::{DbId, Timestamp};

/// A row from the `lots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lot {
    pub id: DbId,
    pub residence_id: DbId,
    pub reference: String,
    pub type_lot: String,
    pub etage: Option<i32>,
    pub surface_m2: Option<f64>,
    pub prix_cents: i64,
    /// One of `disponible`, `option`, `reserve`, `vendu`.
    pub statut: String,
    pub acquereur_id: Option<DbId>,
    pub partenaire_id: Option<DbId>,
    pub vendeur_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new lot.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLot {
    pub residence_id: DbId,
    pub reference: String,
    /// Defaults to `appartement` if omitted.
    pub type_lot: Option<String>,
    pub etage: Option<i32>,
    pub surface_m2: Option<f64>,
    pub prix_cents: i64,
    /// Defaults to `disponible` if omitted.
    pub statut: Option<String>,
    pub vendeur_id: Option<DbId>,
}

/// DTO for updating a lot. All fields are optional.
///
/// For the assignment ids an omitted field keeps the current value and an
/// explicit `null` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLot {
    pub reference: Option<String>,
    pub type_lot: Option<String>,
    pub etage: Option<i32>,
    pub surface_m2: Option<f64>,
    pub prix_cents: Option<i64>,
    pub statut: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub acquereur_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "present")]
    pub partenaire_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "present")]
    pub vendeur_id: Option<Option<DbId>>,
}

/// Wrap any present value, `null` included, so it differs from a missing field.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<DbId>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<DbId>::deserialize(deserializer).map(Some)
}

/// Optional filters for lot listing and export. `None` means no filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LotFilter {
    pub statut: Option<String>,
    pub residence_id: Option<DbId>,
    pub partenaire_id: Option<DbId>,
}

/// A lot joined with residence, acquéreur and partenaire summaries.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LotExportRow {
    pub id: DbId,
    pub reference: String,
    pub type_lot: String,
    pub etage: Option<i32>,
    pub surface_m2: Option<f64>,
    pub prix_cents: i64,
    pub statut: String,
    pub residence_id: DbId,
    pub residence_nom: String,
    pub residence_ville: Option<String>,
    pub acquereur_id: Option<DbId>,
    pub acquereur_nom: Option<String>,
    pub acquereur_email: Option<String>,
    pub partenaire_id: Option<DbId>,
    pub partenaire_nom: Option<String>,
    pub updated_at: Timestamp,
}

impl LotExportRow {
    /// CSV header matching [`LotExportRow::csv_fields`].
    pub const CSV_HEADER: [&'static str; 14] = [
        "id",
        "reference",
        "type_lot",
        "etage",
        "surface_m2",
        "prix",
        "statut",
        "residence",
        "ville",
        "acquereur",
        "acquereur_email",
        "partenaire",
        "residence_id",
        "updated_at",
    ];

    /// Stringified fields for one CSV row. Prices are rendered in euros.
    pub fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.reference.clone(),
            self.type_lot.clone(),
            self.etage.map(|e| e.to_string()).unwrap_or_default(),
            self.surface_m2.map(|s| s.to_string()).unwrap_or_default(),
            format!("{}.{:02}", self.prix_cents / 100, (self.prix_cents % 100).abs()),
            self.statut.clone(),
            self.residence_nom.clone(),
            self.residence_ville.clone().unwrap_or_default(),
            self.acquereur_nom.clone().unwrap_or_default(),
            self.acquereur_email.clone().unwrap_or_default(),
            self.partenaire_nom.clone().unwrap_or_default(),
            self.residence_id.to_string(),
            self.updated_at.to_rfc3339(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_distinguishes_null_from_missing() {
        let input: UpdateLot =
            serde_json::from_str(r#"{"acquereur_id": null, "vendeur_id": 4}"#).unwrap();
        assert_eq!(input.acquereur_id, Some(None));
        assert_eq!(input.vendeur_id, Some(Some(4)));
        assert_eq!(input.partenaire_id, None);
    }
}
