//! Integration tests for conversation messages and unread counters.

use sqlx::PgPool;
use yam_core::messaging::{MessageOwner, SenderType};
use yam_db::models::acquereur::CreateAcquereur;
use yam_db::models::partenaire::CreatePartenaire;
use yam_db::repositories::{AcquereurRepo, MessageRepo, PartenaireRepo};

async fn seed_buyer(pool: &PgPool) -> i64 {
    AcquereurRepo::create(
        pool,
        &CreateAcquereur {
            nom: "Bernard".to_string(),
            prenom: "Luc".to_string(),
            email: None,
            telephone: None,
            date_naissance: None,
            partenaire_id: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "./migrations")]
async fn list_is_chronological_and_new_messages_are_unread(pool: PgPool) {
    let owner = MessageOwner::Acquereur(seed_buyer(&pool).await);

    let first = MessageRepo::create(&pool, owner, SenderType::Staff, None, "Bonjour")
        .await
        .unwrap();
    let second = MessageRepo::create(&pool, owner, SenderType::Acquereur, None, "Merci")
        .await
        .unwrap();

    assert!(!first.is_read);
    assert!(first.read_at.is_none());

    let listed = MessageRepo::list(&pool, owner).await.unwrap();
    assert_eq!(listed.iter().map(|m| m.id).collect::<Vec<_>>(), vec![first.id, second.id]);
    assert_eq!(listed[0].sender_type, "staff");
    assert_eq!(listed[0].owner(), Some(owner));
    assert_eq!(listed[0].partenaire_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn unread_count_tracks_staff_messages_only(pool: PgPool) {
    let owner = MessageOwner::Acquereur(seed_buyer(&pool).await);

    let before = MessageRepo::count_unread(&pool, owner, SenderType::Staff).await.unwrap();
    assert_eq!(before, 0);

    // Counterparty messages never count toward the staff-authored tally.
    MessageRepo::create(&pool, owner, SenderType::Acquereur, None, "Question")
        .await
        .unwrap();
    let staff_msg = MessageRepo::create(&pool, owner, SenderType::Staff, None, "Réponse")
        .await
        .unwrap();

    let after_send = MessageRepo::count_unread(&pool, owner, SenderType::Staff).await.unwrap();
    assert_eq!(after_send, before + 1);

    assert!(MessageRepo::mark_read(&pool, staff_msg.id).await.unwrap());
    let after_read = MessageRepo::count_unread(&pool, owner, SenderType::Staff).await.unwrap();
    assert_eq!(after_read, after_send - 1);

    let stored = MessageRepo::find_by_id(&pool, staff_msg.id).await.unwrap().unwrap();
    assert!(stored.is_read);
    assert!(stored.read_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn mark_read_only_moves_forward(pool: PgPool) {
    let owner = MessageOwner::Acquereur(seed_buyer(&pool).await);
    let msg = MessageRepo::create(&pool, owner, SenderType::Staff, None, "Info")
        .await
        .unwrap();

    assert!(MessageRepo::mark_read(&pool, msg.id).await.unwrap());
    assert!(!MessageRepo::mark_read(&pool, msg.id).await.unwrap());
    assert!(!MessageRepo::mark_read(&pool, 424242).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn conversations_are_isolated_per_owner(pool: PgPool) {
    let buyer_id = seed_buyer(&pool).await;
    let partner = PartenaireRepo::create(
        &pool,
        &CreatePartenaire {
            nom: "Immo Conseil".to_string(),
            societe: None,
            email: None,
            telephone: None,
            commission_bps: Some(400),
        },
    )
    .await
    .unwrap();

    let buyer = MessageOwner::Acquereur(buyer_id);
    let partner = MessageOwner::Partenaire(partner.id);
    MessageRepo::create(&pool, buyer, SenderType::Staff, None, "Pour l'acquéreur")
        .await
        .unwrap();
    MessageRepo::create(&pool, partner, SenderType::Staff, None, "Pour le partenaire")
        .await
        .unwrap();
    MessageRepo::create(&pool, partner, SenderType::Staff, None, "Relance")
        .await
        .unwrap();

    assert_eq!(MessageRepo::list(&pool, buyer).await.unwrap().len(), 1);
    assert_eq!(MessageRepo::list(&pool, partner).await.unwrap().len(), 2);
    assert_eq!(
        MessageRepo::count_unread(&pool, partner, SenderType::Staff).await.unwrap(),
        2
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn messages_require_an_existing_owner(pool: PgPool) {
    let err = MessageRepo::create(
        &pool,
        MessageOwner::Acquereur(987_654),
        SenderType::Staff,
        None,
        "Personne",
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_the_owner_removes_its_conversation(pool: PgPool) {
    let buyer_id = seed_buyer(&pool).await;
    let owner = MessageOwner::Acquereur(buyer_id);
    let msg = MessageRepo::create(&pool, owner, SenderType::Staff, None, "Bienvenue")
        .await
        .unwrap();

    assert!(AcquereurRepo::delete(&pool, buyer_id).await.unwrap());

    assert!(MessageRepo::find_by_id(&pool, msg.id).await.unwrap().is_none());
    assert!(MessageRepo::list(&pool, owner).await.unwrap().is_empty());
}
