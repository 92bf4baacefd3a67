use axum::routing::get;
use axum::Router;

use crate::handlers::{acquereur, message, milestone};
use crate::state::AppState;

/// Routes mounted at `/acquereurs`.
///
/// ```text
/// GET    /                                        -> list
/// POST   /                                        -> create
/// GET    /{id}                                    -> get_by_id
/// PUT    /{id}                                    -> update
/// DELETE /{id}                                    -> delete
///
/// GET    /{id}/lots/{lot_id}/milestones           -> milestone::list
/// POST   /{id}/lots/{lot_id}/milestones           -> milestone::create_defaults
/// GET    /{id}/lots/{lot_id}/milestones/progress  -> milestone::progress
///
/// GET    /{id}/messages                           -> list_for_acquereur
/// POST   /{id}/messages                           -> send_to_acquereur
/// GET    /{id}/messages/unread-count              -> unread_for_acquereur
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(acquereur::list).post(acquereur::create))
        .route(
            "/{id}",
            get(acquereur::get_by_id)
                .put(acquereur::update)
                .delete(acquereur::delete),
        )
        .route(
            "/{id}/lots/{lot_id}/milestones",
            get(milestone::list).post(milestone::create_defaults),
        )
        .route(
            "/{id}/lots/{lot_id}/milestones/progress",
            get(milestone::progress),
        )
        .route(
            "/{id}/messages",
            get(message::list_for_acquereur).post(message::send_to_acquereur),
        )
        .route(
            "/{id}/messages/unread-count",
            get(message::unread_for_acquereur),
        )
}
