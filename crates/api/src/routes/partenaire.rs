use axum::routing::get;
use axum::Router;

use crate::handlers::{message, partenaire};
use crate::state::AppState;

/// Routes mounted at `/partenaires`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
///
/// GET    /{id}/messages             -> list_for_partenaire
/// POST   /{id}/messages             -> send_to_partenaire
/// GET    /{id}/messages/unread-count -> unread_for_partenaire
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(partenaire::list).post(partenaire::create))
        .route(
            "/{id}",
            get(partenaire::get_by_id)
                .put(partenaire::update)
                .delete(partenaire::delete),
        )
        .route(
            "/{id}/messages",
            get(message::list_for_partenaire).post(message::send_to_partenaire),
        )
        .route(
            "/{id}/messages/unread-count",
            get(message::unread_for_partenaire),
        )
}
