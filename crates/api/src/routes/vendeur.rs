use axum::routing::get;
use axum::Router;

use crate::handlers::vendeur;
use crate::state::AppState;

/// Routes mounted at `/vendeurs`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(vendeur::list).post(vendeur::create))
        .route(
            "/{id}",
            get(vendeur::get_by_id)
                .put(vendeur::update)
                .delete(vendeur::delete),
        )
}
