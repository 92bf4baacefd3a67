use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{lot, option};
use crate::state::AppState;

/// Routes mounted at `/lots`.
///
/// ```text
/// GET    /               -> list (query: statut, residence_id, partenaire_id)
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// POST   /{id}/options   -> option::place
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lot::list).post(lot::create))
        .route(
            "/{id}",
            get(lot::get_by_id).put(lot::update).delete(lot::delete),
        )
        .route("/{id}/options", post(option::place))
}
