//! Integration tests for the birthday lookup.

use chrono::NaiveDate;
use sqlx::PgPool;
use yam_core::birthday::birthday_keys;
use yam_db::models::acquereur::CreateAcquereur;
use yam_db::repositories::AcquereurRepo;

async fn buyer(pool: &PgPool, prenom: &str, email: Option<&str>, dob: Option<NaiveDate>) {
    AcquereurRepo::create(
        pool,
        &CreateAcquereur {
            nom: "Test".to_string(),
            prenom: prenom.to_string(),
            email: email.map(str::to_string),
            telephone: None,
            date_naissance: dob,
            partenaire_id: None,
        },
    )
    .await
    .unwrap();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn finds_buyers_born_today_with_an_email(pool: PgPool) {
    buyer(&pool, "Alice", Some("alice@example.com"), Some(date(1985, 6, 14))).await;
    buyer(&pool, "Bruno", None, Some(date(1990, 6, 14))).await;
    buyer(&pool, "Chloé", Some("chloe@example.com"), Some(date(1979, 6, 15))).await;
    buyer(&pool, "Denis", Some("denis@example.com"), None).await;

    let found = AcquereurRepo::list_birthdays(&pool, &birthday_keys(date(2026, 6, 14)))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].prenom, "Alice");
}

#[sqlx::test(migrations = "./migrations")]
async fn leap_day_birthdays_fall_on_feb_28_in_common_years(pool: PgPool) {
    buyer(&pool, "Léa", Some("lea@example.com"), Some(date(1996, 2, 29))).await;

    let common = AcquereurRepo::list_birthdays(&pool, &birthday_keys(date(2027, 2, 28)))
        .await
        .unwrap();
    assert_eq!(common.len(), 1);

    let leap = AcquereurRepo::list_birthdays(&pool, &birthday_keys(date(2028, 2, 28)))
        .await
        .unwrap();
    assert!(leap.is_empty());
}
