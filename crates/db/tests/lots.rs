//! Integration tests for lot updates and price bounds.

use sqlx::PgPool;
use yam_db::models::lot::{CreateLot, UpdateLot};
use yam_db::models::partenaire::CreatePartenaire;
use yam_db::models::residence::CreateResidence;
use yam_db::repositories::{LotRepo, PartenaireRepo, ResidenceRepo};

async fn seed_residence(pool: &PgPool) -> i64 {
    ResidenceRepo::create(
        pool,
        &CreateResidence {
            nom: "Les Tilleuls".to_string(),
            adresse: None,
            ville: Some("Nantes".to_string()),
            code_postal: None,
            description: None,
            date_livraison_prevue: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn new_lot(residence_id: i64, prix_cents: i64) -> CreateLot {
    CreateLot {
        residence_id,
        reference: "B12".to_string(),
        type_lot: None,
        etage: Some(1),
        surface_m2: None,
        prix_cents,
        statut: None,
        vendeur_id: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn null_clears_an_assignment_and_omission_keeps_it(pool: PgPool) {
    let residence_id = seed_residence(&pool).await;
    let lot = LotRepo::create(&pool, &new_lot(residence_id, 150_000_00)).await.unwrap();
    let partner = PartenaireRepo::create(
        &pool,
        &CreatePartenaire {
            nom: "Cap Invest".to_string(),
            societe: None,
            email: None,
            telephone: None,
            commission_bps: None,
        },
    )
    .await
    .unwrap();

    let assigned = LotRepo::update(
        &pool,
        lot.id,
        &UpdateLot {
            partenaire_id: Some(Some(partner.id)),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(assigned.partenaire_id, Some(partner.id));

    let renamed: UpdateLot = serde_json::from_str(r#"{"reference": "B12-bis"}"#).unwrap();
    let kept = LotRepo::update(&pool, lot.id, &renamed).await.unwrap().unwrap();
    assert_eq!(kept.reference, "B12-bis");
    assert_eq!(kept.partenaire_id, Some(partner.id));

    let clear: UpdateLot = serde_json::from_str(r#"{"partenaire_id": null}"#).unwrap();
    let cleared = LotRepo::update(&pool, lot.id, &clear).await.unwrap().unwrap();
    assert_eq!(cleared.partenaire_id, None);
    assert_eq!(cleared.reference, "B12-bis");
}

#[sqlx::test(migrations = "./migrations")]
async fn negative_prices_violate_the_check(pool: PgPool) {
    let residence_id = seed_residence(&pool).await;

    let err = LotRepo::create(&pool, &new_lot(residence_id, -1)).await.unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23514"));
    assert_eq!(db_err.constraint(), Some("ck_lots_prix_cents"));
}
