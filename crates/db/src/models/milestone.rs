//! Milestone step model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yam_core::milestone::MilestoneStatus;
use yam_core::types::{DbId, Timestamp};

/// A row from the `milestone_steps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MilestoneStep {
    pub id: DbId,
    pub lot_id: DbId,
    pub acquereur_id: DbId,
    pub ordinal: i32,
    pub label: String,
    pub description: Option<String>,
    /// One of `pending`, `validated`, `completed`.
    pub status: String,
    pub validated_at: Option<Timestamp>,
    pub validated_by: Option<DbId>,
    pub completed_at: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MilestoneStep {
    /// Parsed status. Unknown values (which the CHECK constraint forbids)
    /// are treated as pending.
    pub fn parsed_status(&self) -> MilestoneStatus {
        MilestoneStatus::from_str_value(&self.status).unwrap_or(MilestoneStatus::Pending)
    }
}

/// Request body for staff validation of a step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidateStep {
    pub notes: Option<String>,
}
