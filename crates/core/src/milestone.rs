//! Construction-progress milestones ("appels de fond").
//!
//! Each (lot, acquéreur) pair owns a checklist of ten steps created from
//! [`DEFAULT_STEPS`]. A step moves `pending` -> `validated` -> `completed`.
//! Transitions are not rejected when they skip or reverse a stage; callers
//! use [`MilestoneStatus::is_forward_transition`] to detect and log them.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_VALIDATED: &str = "validated";
pub const STATUS_COMPLETED: &str = "completed";

/// All valid milestone status strings.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_VALIDATED, STATUS_COMPLETED];

/// One entry of the fixed milestone template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTemplate {
    pub ordinal: i32,
    pub label: &'static str,
    pub description: &'static str,
}

/// The ten construction and delivery stages created for every sale.
pub const DEFAULT_STEPS: [StepTemplate; 10] = [
    StepTemplate {
        ordinal: 1,
        label: "Réservation",
        description: "Signature du contrat de réservation et versement du dépôt de garantie",
    },
    StepTemplate {
        ordinal: 2,
        label: "Signature de l'acte authentique",
        description: "Signature de l'acte de vente chez le notaire",
    },
    StepTemplate {
        ordinal: 3,
        label: "Ouverture du chantier",
        description: "Déclaration d'ouverture de chantier et démarrage des travaux",
    },
    StepTemplate {
        ordinal: 4,
        label: "Achèvement des fondations",
        description: "Fondations terminées, appel de fonds correspondant",
    },
    StepTemplate {
        ordinal: 5,
        label: "Plancher bas du rez-de-chaussée",
        description: "Coulage du plancher bas du rez-de-chaussée",
    },
    StepTemplate {
        ordinal: 6,
        label: "Élévation des murs",
        description: "Gros œuvre en élévation",
    },
    StepTemplate {
        ordinal: 7,
        label: "Mise hors d'eau",
        description: "Toiture et étanchéité posées",
    },
    StepTemplate {
        ordinal: 8,
        label: "Mise hors d'air",
        description: "Menuiseries extérieures posées",
    },
    StepTemplate {
        ordinal: 9,
        label: "Achèvement des travaux",
        description: "Travaux terminés, visite de pré-livraison",
    },
    StepTemplate {
        ordinal: 10,
        label: "Livraison",
        description: "Remise des clés et procès-verbal de livraison",
    },
];

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Status of a single milestone step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    Pending,
    Validated,
    Completed,
}

impl MilestoneStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_VALIDATED => Ok(Self::Validated),
            STATUS_COMPLETED => Ok(Self::Completed),
            _ => Err(format!(
                "Invalid milestone status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Validated => STATUS_VALIDATED,
            Self::Completed => STATUS_COMPLETED,
        }
    }

    /// Whether moving from `self` to `next` follows the
    /// pending -> validated -> completed order, allowing skips.
    ///
    /// Re-applying the current status counts as forward.
    pub fn is_forward_transition(&self, next: MilestoneStatus) -> bool {
        next >= *self
    }

    /// Whether the step counts toward progress.
    ///
    /// Both `validated` and `completed` count as having passed the gate.
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Validated | Self::Completed)
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Human-facing completion ratio of a milestone checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub percentage: u8,
}

/// Compute progress over a list of step statuses.
///
/// Returns `None` for an empty list.
pub fn compute_progress<I>(statuses: I) -> Option<Progress>
where
    I: IntoIterator<Item = MilestoneStatus>,
{
    let (current, total) = statuses
        .into_iter()
        .fold((0usize, 0usize), |(passed, total), status| {
            (passed + usize::from(status.is_passed()), total + 1)
        });

    if total == 0 {
        return None;
    }

    let percentage = (current as f64 / total as f64 * 100.0).round() as u8;
    Some(Progress {
        current,
        total,
        percentage,
    })
}
