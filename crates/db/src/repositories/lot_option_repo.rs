//! Repository for the `lot_options` table.
//!
//! Placing, cancelling and converting an option also moves the lot's
//! `statut`, so each of those runs in a single transaction.

use sqlx::PgPool;
use yam_core::types::{DbId, Timestamp};

use crate::models::lot_option::{ExpiryResult, LotOption, OptionDetails, PlaceOption};

const COLUMNS: &str =
    "id, lot_id, partenaire_id, client_nom, statut, expires_at, created_at, updated_at";

/// Outcome of an attempt to place an option.
#[derive(Debug)]
pub enum PlaceOutcome {
    Placed(LotOption),
    LotNotFound,
    /// The lot exists but is not `disponible`.
    LotUnavailable,
}

/// Provides option lifecycle operations.
pub struct LotOptionRepo;

impl LotOptionRepo {
    /// Hold an available lot until `expires_at`.
    pub async fn place(
        pool: &PgPool,
        lot_id: DbId,
        input: &PlaceOption,
        expires_at: Timestamp,
    ) -> Result<PlaceOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let held: Option<DbId> = sqlx::query_scalar(
            "UPDATE lots SET statut = 'option', partenaire_id = COALESCE($2, partenaire_id)
             WHERE id = $1 AND statut = 'disponible'
             RETURNING id",
        )
        .bind(lot_id)
        .bind(input.partenaire_id)
        .fetch_optional(&mut *tx)
        .await?;

        if held.is_none() {
            let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM lots WHERE id = $1)")
                .bind(lot_id)
                .fetch_one(&mut *tx)
                .await?;
            tx.rollback().await?;
            return Ok(if exists {
                PlaceOutcome::LotUnavailable
            } else {
                PlaceOutcome::LotNotFound
            });
        }

        let query = format!(
            "INSERT INTO lot_options (lot_id, partenaire_id, client_nom, expires_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let option = sqlx::query_as::<_, LotOption>(&query)
            .bind(lot_id)
            .bind(input.partenaire_id)
            .bind(&input.client_nom)
            .bind(expires_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(PlaceOutcome::Placed(option))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LotOption>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lot_options WHERE id = $1");
        sqlx::query_as::<_, LotOption>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active options, soonest expiry first. Optionally restricted to one partner.
    pub async fn list_active(
        pool: &PgPool,
        partenaire_id: Option<DbId>,
    ) -> Result<Vec<LotOption>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lot_options
             WHERE statut = 'active' AND ($1::BIGINT IS NULL OR partenaire_id = $1)
             ORDER BY expires_at, id"
        );
        sqlx::query_as::<_, LotOption>(&query)
            .bind(partenaire_id)
            .fetch_all(pool)
            .await
    }

    /// Option with its lot, residence and partner, for notifications.
    pub async fn find_details(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OptionDetails>, sqlx::Error> {
        sqlx::query_as::<_, OptionDetails>(
            "SELECT o.id, o.lot_id, o.statut, o.expires_at, o.client_nom,
                    l.reference AS lot_reference, r.nom AS residence_nom,
                    o.partenaire_id, p.nom AS partenaire_nom, p.email AS partenaire_email
             FROM lot_options o
             JOIN lots l ON l.id = o.lot_id
             JOIN residences r ON r.id = l.residence_id
             LEFT JOIN partenaires p ON p.id = o.partenaire_id
             WHERE o.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Cancel an active option and release its lot.
    ///
    /// Returns `None` if the option does not exist or is no longer active.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<LotOption>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE lot_options SET statut = 'annulee'
             WHERE id = $1 AND statut = 'active'
             RETURNING {COLUMNS}"
        );
        let Some(option) = sqlx::query_as::<_, LotOption>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            "UPDATE lots SET statut = 'disponible', partenaire_id = NULL
             WHERE id = $1 AND statut = 'option'",
        )
        .bind(option.lot_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(option))
    }

    /// Turn an active option into a reservation for `acquereur_id`.
    ///
    /// Returns `None` if the option does not exist or is no longer active.
    pub async fn convert(
        pool: &PgPool,
        id: DbId,
        acquereur_id: DbId,
    ) -> Result<Option<LotOption>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE lot_options SET statut = 'convertie'
             WHERE id = $1 AND statut = 'active'
             RETURNING {COLUMNS}"
        );
        let Some(option) = sqlx::query_as::<_, LotOption>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("UPDATE lots SET statut = 'reserve', acquereur_id = $2 WHERE id = $1")
            .bind(option.lot_id)
            .bind(acquereur_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(option))
    }

    /// Run `expire_stale_options()`: expire every overdue active option and
    /// release the lots it held.
    pub async fn expire_stale(pool: &PgPool) -> Result<ExpiryResult, sqlx::Error> {
        sqlx::query_as::<_, ExpiryResult>(
            "SELECT expired_options, released_lots FROM expire_stale_options()",
        )
        .fetch_one(pool)
        .await
    }
}
