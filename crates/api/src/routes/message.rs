use axum::routing::post;
use axum::Router;

use crate::handlers::message;
use crate::state::AppState;

/// Routes mounted at `/messages`.
///
/// ```text
/// POST /{id}/read  -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/read", post(message::mark_read))
}
