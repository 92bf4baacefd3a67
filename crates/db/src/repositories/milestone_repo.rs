//! Repository for the `milestone_steps` table.

use sqlx::PgPool;
use yam_core::milestone::{StepTemplate, DEFAULT_STEPS, STATUS_COMPLETED, STATUS_VALIDATED};
use yam_core::types::DbId;

use crate::models::milestone::MilestoneStep;

const COLUMNS: &str = "id, lot_id, acquereur_id, ordinal, label, description, status, \
                       validated_at, validated_by, completed_at, notes, created_at, updated_at";

/// Provides milestone step persistence.
pub struct MilestoneRepo;

impl MilestoneRepo {
    /// Create the ten standard construction steps for a (lot, buyer) pair.
    pub async fn create_default_steps(
        pool: &PgPool,
        lot_id: DbId,
        acquereur_id: DbId,
    ) -> Result<Vec<MilestoneStep>, sqlx::Error> {
        Self::create_steps(pool, lot_id, acquereur_id, &DEFAULT_STEPS).await
    }

    /// Insert one pending step per template for a (lot, buyer) pair in a
    /// single statement. Returns the steps ordered by ordinal.
    ///
    /// A second call for the same pair violates `uq_milestone_steps_ordinal`.
    pub async fn create_steps(
        pool: &PgPool,
        lot_id: DbId,
        acquereur_id: DbId,
        templates: &[StepTemplate],
    ) -> Result<Vec<MilestoneStep>, sqlx::Error> {
        let ordinals: Vec<i32> = templates.iter().map(|t| t.ordinal).collect();
        let labels: Vec<String> = templates.iter().map(|t| t.label.to_string()).collect();
        let descriptions: Vec<String> =
            templates.iter().map(|t| t.description.to_string()).collect();

        let query = format!(
            "INSERT INTO milestone_steps (lot_id, acquereur_id, ordinal, label, description)
             SELECT $1, $2, t.ordinal, t.label, t.description
             FROM UNNEST($3::INT[], $4::TEXT[], $5::TEXT[]) AS t(ordinal, label, description)
             RETURNING {COLUMNS}"
        );
        let mut steps = sqlx::query_as::<_, MilestoneStep>(&query)
            .bind(lot_id)
            .bind(acquereur_id)
            .bind(&ordinals)
            .bind(&labels)
            .bind(&descriptions)
            .fetch_all(pool)
            .await?;
        steps.sort_by_key(|s| s.ordinal);
        Ok(steps)
    }

    /// Steps for a (lot, buyer) pair in ordinal order.
    pub async fn list_for(
        pool: &PgPool,
        lot_id: DbId,
        acquereur_id: DbId,
    ) -> Result<Vec<MilestoneStep>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM milestone_steps
             WHERE lot_id = $1 AND acquereur_id = $2
             ORDER BY ordinal"
        );
        sqlx::query_as::<_, MilestoneStep>(&query)
            .bind(lot_id)
            .bind(acquereur_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MilestoneStep>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM milestone_steps WHERE id = $1");
        sqlx::query_as::<_, MilestoneStep>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a step validated by a staff user, stamping `validated_at` and
    /// `validated_by`. Existing notes are kept when `notes` is `None`.
    pub async fn validate_by_staff(
        pool: &PgPool,
        id: DbId,
        staff_user_id: DbId,
        notes: Option<&str>,
    ) -> Result<Option<MilestoneStep>, sqlx::Error> {
        let query = format!(
            "UPDATE milestone_steps SET
                status = $2,
                validated_at = NOW(),
                validated_by = $3,
                notes = COALESCE($4, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MilestoneStep>(&query)
            .bind(id)
            .bind(STATUS_VALIDATED)
            .bind(staff_user_id)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }

    /// Mark a step completed, stamping `completed_at`.
    pub async fn mark_complete(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MilestoneStep>, sqlx::Error> {
        let query = format!(
            "UPDATE milestone_steps SET status = $2, completed_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MilestoneStep>(&query)
            .bind(id)
            .bind(STATUS_COMPLETED)
            .fetch_optional(pool)
            .await
    }
}
