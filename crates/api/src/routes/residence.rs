use axum::routing::get;
use axum::Router;

use crate::handlers::residence;
use crate::state::AppState;

/// Routes mounted at `/residences`.
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
        .route("/", get(residence::list).post(residence::create))
        .route(
            "/{id}",
            get(residence::get_by_id)
                .put(residence::update)
                .delete(residence::delete),
        )
}
