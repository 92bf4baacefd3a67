//! Conversations between staff and a buyer over HTTP.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get_auth, post_auth, post_json_auth, seed_buyer, seed_user, token,
    token_with,
};
use serde_json::json;
use sqlx::PgPool;

struct Parties {
    acquereur_id: i64,
    staff: String,
    buyer: String,
}

async fn parties(pool: &PgPool) -> Parties {
    let acquereur_id = seed_buyer(pool, "Sophie", Some("sophie@example.com"), None).await;
    let staff_id = seed_user(pool, "desk@yam.test", "desk-pass", "commercial", None, None).await;
    let buyer_id = seed_user(
        pool,
        "sophie@example.com",
        "sophie-pass",
        "acquereur",
        Some(acquereur_id),
        None,
    )
    .await;
    Parties {
        acquereur_id,
        staff: token("commercial", staff_id),
        buyer: token_with("acquereur", buyer_id, Some(acquereur_id), None),
    }
}

async fn unread(pool: &PgPool, p: &Parties, token: &str, from: &str) -> i64 {
    let uri = format!(
        "/api/v1/acquereurs/{}/messages/unread-count?from={from}",
        p.acquereur_id
    );
    let json = body_json(get_auth(build_test_app(pool.clone()), &uri, token).await).await;
    json["data"]["unread"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unread_count_follows_sends_and_reads(pool: PgPool) {
    let p = parties(&pool).await;
    let uri = format!("/api/v1/acquereurs/{}/messages", p.acquereur_id);
    assert_eq!(unread(&pool, &p, &p.buyer, "staff").await, 0);

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        json!({ "body": "  Votre acte est prêt.  " }),
        &p.staff,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let message = body_json(response).await;
    assert_eq!(message["sender_type"], "staff");
    assert_eq!(message["body"], "Votre acte est prêt.");
    assert_eq!(message["is_read"], false);
    assert_eq!(unread(&pool, &p, &p.buyer, "staff").await, 1);

    let id = message["id"].as_i64().unwrap();
    let read = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/messages/{id}/read"),
        &p.buyer,
    )
    .await;
    assert_eq!(read.status(), StatusCode::OK);
    let read = body_json(read).await;
    assert_eq!(read["is_read"], true);
    let first_read_at = read["read_at"].clone();
    assert!(!first_read_at.is_null());
    assert_eq!(unread(&pool, &p, &p.buyer, "staff").await, 0);

    let again = post_auth(
        build_test_app(pool),
        &format!("/api/v1/messages/{id}/read"),
        &p.buyer,
    )
    .await;
    assert_eq!(body_json(again).await["read_at"], first_read_at);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn buyer_replies_are_attributed_to_the_buyer(pool: PgPool) {
    let p = parties(&pool).await;
    let uri = format!("/api/v1/acquereurs/{}/messages", p.acquereur_id);

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        json!({ "body": "Merci, je passe jeudi." }),
        &p.buyer,
    )
    .await;
    assert_eq!(body_json(response).await["sender_type"], "acquereur");

    let conversation = get_auth(build_test_app(pool.clone()), &uri, &p.staff).await;
    let conversation = body_json(conversation).await;
    assert_eq!(conversation["messages"].as_array().unwrap().len(), 1);
    assert_eq!(conversation["unread"], 1);
    assert_eq!(unread(&pool, &p, &p.staff, "acquereur").await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_messages_are_rejected(pool: PgPool) {
    let p = parties(&pool).await;
    let uri = format!("/api/v1/acquereurs/{}/messages", p.acquereur_id);

    let response =
        post_json_auth(build_test_app(pool), &uri, json!({ "body": "   " }), &p.staff).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn outsiders_cannot_mark_messages_read(pool: PgPool) {
    let p = parties(&pool).await;
    let uri = format!("/api/v1/acquereurs/{}/messages", p.acquereur_id);
    let message = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        json!({ "body": "Bonjour" }),
        &p.staff,
    )
    .await;
    let id = body_json(message).await["id"].as_i64().unwrap();

    let outsider = token_with("acquereur", 77, Some(p.acquereur_id + 1000), None);
    let response = post_auth(
        build_test_app(pool),
        &format!("/api/v1/messages/{id}/read"),
        &outsider,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn senders_cannot_clear_their_own_unread_badge(pool: PgPool) {
    let p = parties(&pool).await;
    let uri = format!("/api/v1/acquereurs/{}/messages", p.acquereur_id);
    let message = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        json!({ "body": "Signature lundi" }),
        &p.staff,
    )
    .await;
    let id = body_json(message).await["id"].as_i64().unwrap();

    let response = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/messages/{id}/read"),
        &p.staff,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["is_read"], false);
    assert!(json["read_at"].is_null());
    assert_eq!(unread(&pool, &p, &p.buyer, "staff").await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn conversations_of_unknown_owners_are_not_found(pool: PgPool) {
    let p = parties(&pool).await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/acquereurs/987654/messages",
        json!({ "body": "Allô ?" }),
        &p.staff,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/partenaires/987654/messages/unread-count",
        &p.staff,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, 0);
}
