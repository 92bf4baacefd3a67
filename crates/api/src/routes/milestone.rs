use axum::routing::post;
use axum::Router;

use crate::handlers::milestone;
use crate::state::AppState;

/// Routes mounted at `/milestones`.
///
/// ```text
/// POST /{id}/validate  -> validate
/// POST /{id}/complete  -> complete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/validate", post(milestone::validate))
        .route("/{id}/complete", post(milestone::complete))
}
