//! Milestone workflow over HTTP: creation, staff transitions, progress.

mod common;

use axum::http::StatusCode;
use common::{
    assign_lot, body_json, build_test_app, get_auth, post_auth, seed_buyer, seed_lot,
    seed_residence, seed_user, token, token_with,
};
use sqlx::PgPool;

struct Fixture {
    acquereur_id: i64,
    lot_id: i64,
    staff_token: String,
}

async fn fixture(pool: &PgPool) -> Fixture {
    let residence_id = seed_residence(pool, "Le Clos des Vignes").await;
    let lot_id = seed_lot(pool, residence_id, "B204").await;
    let acquereur_id = seed_buyer(pool, "Julie", Some("julie@example.com"), None).await;
    assign_lot(pool, lot_id, acquereur_id).await;
    let staff_id = seed_user(pool, "agent@yam.test", "agent-pass", "commercial", None, None).await;
    Fixture {
        acquereur_id,
        lot_id,
        staff_token: token("commercial", staff_id),
    }
}

fn steps_uri(f: &Fixture) -> String {
    format!("/api/v1/acquereurs/{}/lots/{}/milestones", f.acquereur_id, f.lot_id)
}

#[sqlx::test(migrations = "../db/migrations")]
async fn default_steps_are_created_once(pool: PgPool) {
    let f = fixture(&pool).await;

    let response = post_auth(build_test_app(pool.clone()), &steps_uri(&f), &f.staff_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let steps = body_json(response).await;
    let steps = steps.as_array().unwrap();
    assert_eq!(steps.len(), 10);
    assert_eq!(steps[0]["ordinal"], 1);
    assert!(steps.iter().all(|s| s["status"] == "pending"));

    let again = post_auth(build_test_app(pool), &steps_uri(&f), &f.staff_token).await;
    assert_eq!(again.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn steps_require_the_lot_to_belong_to_the_buyer(pool: PgPool) {
    let f = fixture(&pool).await;
    let stranger = seed_buyer(&pool, "Marc", None, None).await;

    let uri = format!("/api/v1/acquereurs/{stranger}/lots/{}/milestones", f.lot_id);
    let response = post_auth(build_test_app(pool), &uri, &f.staff_token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn progress_counts_validated_and_completed_steps(pool: PgPool) {
    let f = fixture(&pool).await;

    let progress_uri = format!("{}/progress", steps_uri(&f));
    let empty =
        get_auth(build_test_app(pool.clone()), &progress_uri, &f.staff_token).await;
    let empty = body_json(empty).await;
    assert!(empty["data"].is_null());

    let created =
        body_json(post_auth(build_test_app(pool.clone()), &steps_uri(&f), &f.staff_token).await)
            .await;
    let ids: Vec<i64> = created
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();

    for id in &ids[..4] {
        let response = post_auth(
            build_test_app(pool.clone()),
            &format!("/api/v1/milestones/{id}/validate"),
            &f.staff_token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let step = body_json(response).await;
        assert_eq!(step["status"], "validated");
        assert!(step["validated_by"].is_i64());
    }
    for id in &ids[4..6] {
        let response = post_auth(
            build_test_app(pool.clone()),
            &format!("/api/v1/milestones/{id}/complete"),
            &f.staff_token,
        )
        .await;
        assert_eq!(body_json(response).await["status"], "completed");
    }

    let progress = get_auth(build_test_app(pool), &progress_uri, &f.staff_token).await;
    let progress = body_json(progress).await;
    assert_eq!(progress["data"]["current"], 6);
    assert_eq!(progress["data"]["total"], 10);
    assert_eq!(progress["data"]["percentage"], 60);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn backward_transition_is_accepted(pool: PgPool) {
    let f = fixture(&pool).await;
    let created =
        body_json(post_auth(build_test_app(pool.clone()), &steps_uri(&f), &f.staff_token).await)
            .await;
    let id = created[0]["id"].as_i64().unwrap();

    post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/milestones/{id}/complete"),
        &f.staff_token,
    )
    .await;
    let response = post_auth(
        build_test_app(pool),
        &format!("/api/v1/milestones/{id}/validate"),
        &f.staff_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "validated");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn buyers_only_see_their_own_steps(pool: PgPool) {
    let f = fixture(&pool).await;
    post_auth(build_test_app(pool.clone()), &steps_uri(&f), &f.staff_token).await;

    let owner = token_with("acquereur", 50, Some(f.acquereur_id), None);
    let response = get_auth(build_test_app(pool.clone()), &steps_uri(&f), &owner).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 10);

    let other = token_with("acquereur", 51, Some(f.acquereur_id + 1000), None);
    let response = get_auth(build_test_app(pool), &steps_uri(&f), &other).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_step_is_404(pool: PgPool) {
    let f = fixture(&pool).await;
    let response =
        post_auth(build_test_app(pool), "/api/v1/milestones/999999/complete", &f.staff_token)
            .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
