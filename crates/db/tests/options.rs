//! Integration tests for lot options and the expiry procedure.

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use yam_db::models::acquereur::CreateAcquereur;
use yam_db::models::lot::{CreateLot, LotFilter};
use yam_db::models::lot_option::PlaceOption;
use yam_db::models::partenaire::CreatePartenaire;
use yam_db::models::residence::CreateResidence;
use yam_db::repositories::lot_option_repo::PlaceOutcome;
use yam_db::repositories::{AcquereurRepo, LotOptionRepo, LotRepo, PartenaireRepo, ResidenceRepo};

async fn seed_lot(pool: &PgPool, reference: &str) -> i64 {
    let residence = ResidenceRepo::create(
        pool,
        &CreateResidence {
            nom: format!("Résidence {reference}"),
            adresse: None,
            ville: None,
            code_postal: None,
            description: None,
            date_livraison_prevue: None,
        },
    )
    .await
    .unwrap();
    LotRepo::create(
        pool,
        &CreateLot {
            residence_id: residence.id,
            reference: reference.to_string(),
            type_lot: None,
            etage: None,
            surface_m2: None,
            prix_cents: 180_000_00,
            statut: None,
            vendeur_id: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_partner(pool: &PgPool) -> i64 {
    PartenaireRepo::create(
        pool,
        &CreatePartenaire {
            nom: "Patrimoine Plus".to_string(),
            societe: None,
            email: Some("contact@patrimoine.test".to_string()),
            telephone: None,
            commission_bps: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn hold(partenaire_id: i64) -> PlaceOption {
    PlaceOption {
        partenaire_id: Some(partenaire_id),
        client_nom: Some("M. Petit".to_string()),
        duration_days: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn placing_an_option_holds_the_lot(pool: PgPool) {
    let lot_id = seed_lot(&pool, "B12").await;
    let partner_id = seed_partner(&pool).await;

    let outcome = LotOptionRepo::place(&pool, lot_id, &hold(partner_id), Utc::now() + Duration::days(7))
        .await
        .unwrap();
    let option = assert_matches!(outcome, PlaceOutcome::Placed(o) => o);
    assert_eq!(option.statut, "active");

    let lot = LotRepo::find_by_id(&pool, lot_id).await.unwrap().unwrap();
    assert_eq!(lot.statut, "option");
    assert_eq!(lot.partenaire_id, Some(partner_id));

    let details = LotOptionRepo::find_details(&pool, option.id).await.unwrap().unwrap();
    assert_eq!(details.lot_reference, "B12");
    assert_eq!(details.partenaire_email.as_deref(), Some("contact@patrimoine.test"));

    // The lot is no longer available for a second hold.
    let second = LotOptionRepo::place(&pool, lot_id, &hold(partner_id), Utc::now() + Duration::days(7))
        .await
        .unwrap();
    assert_matches!(second, PlaceOutcome::LotUnavailable);

    let missing = LotOptionRepo::place(&pool, 987654, &hold(partner_id), Utc::now())
        .await
        .unwrap();
    assert_matches!(missing, PlaceOutcome::LotNotFound);
}

#[sqlx::test(migrations = "./migrations")]
async fn cancelling_releases_the_lot(pool: PgPool) {
    let lot_id = seed_lot(&pool, "C3").await;
    let partner_id = seed_partner(&pool).await;
    let option = assert_matches!(
        LotOptionRepo::place(&pool, lot_id, &hold(partner_id), Utc::now() + Duration::days(2)).await.unwrap(),
        PlaceOutcome::Placed(o) => o
    );

    let cancelled = LotOptionRepo::cancel(&pool, option.id).await.unwrap().unwrap();
    assert_eq!(cancelled.statut, "annulee");
    let lot = LotRepo::find_by_id(&pool, lot_id).await.unwrap().unwrap();
    assert_eq!(lot.statut, "disponible");
    assert_eq!(lot.partenaire_id, None);

    assert!(LotOptionRepo::cancel(&pool, option.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn converting_reserves_the_lot_for_a_buyer(pool: PgPool) {
    let lot_id = seed_lot(&pool, "D7").await;
    let partner_id = seed_partner(&pool).await;
    let buyer = AcquereurRepo::create(
        &pool,
        &CreateAcquereur {
            nom: "Petit".to_string(),
            prenom: "Jean".to_string(),
            email: None,
            telephone: None,
            date_naissance: None,
            partenaire_id: Some(partner_id),
        },
    )
    .await
    .unwrap();
    let option = assert_matches!(
        LotOptionRepo::place(&pool, lot_id, &hold(partner_id), Utc::now() + Duration::days(2)).await.unwrap(),
        PlaceOutcome::Placed(o) => o
    );

    let converted = LotOptionRepo::convert(&pool, option.id, buyer.id).await.unwrap().unwrap();
    assert_eq!(converted.statut, "convertie");

    let lot = LotRepo::find_by_id(&pool, lot_id).await.unwrap().unwrap();
    assert_eq!(lot.statut, "reserve");
    assert_eq!(lot.acquereur_id, Some(buyer.id));
    assert_eq!(LotRepo::list_for_acquereur(&pool, buyer.id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn expiry_procedure_releases_only_stale_options(pool: PgPool) {
    let stale_lot = seed_lot(&pool, "E1").await;
    let fresh_lot = seed_lot(&pool, "E2").await;
    let partner_id = seed_partner(&pool).await;

    LotOptionRepo::place(&pool, stale_lot, &hold(partner_id), Utc::now() - Duration::hours(1))
        .await
        .unwrap();
    LotOptionRepo::place(&pool, fresh_lot, &hold(partner_id), Utc::now() + Duration::days(3))
        .await
        .unwrap();

    let result = LotOptionRepo::expire_stale(&pool).await.unwrap();
    assert_eq!(result.expired_options, 1);
    assert_eq!(result.released_lots, 1);

    let stale = LotRepo::find_by_id(&pool, stale_lot).await.unwrap().unwrap();
    assert_eq!(stale.statut, "disponible");
    let fresh = LotRepo::find_by_id(&pool, fresh_lot).await.unwrap().unwrap();
    assert_eq!(fresh.statut, "option");

    let active = LotOptionRepo::list_active(&pool, None).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].lot_id, fresh_lot);

    // Idempotent once nothing is overdue.
    let again = LotOptionRepo::expire_stale(&pool).await.unwrap();
    assert_eq!(again.expired_options, 0);
    assert_eq!(again.released_lots, 0);

    let available = LotRepo::list_filtered(
        &pool,
        &LotFilter {
            statut: Some("disponible".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(available.len(), 1);
}
