use axum::routing::{get, post};
use axum::Router;

use crate::handlers::option;
use crate::state::AppState;

/// Routes mounted at `/options`.
///
/// ```text
/// GET  /              -> list_active
/// POST /{id}/cancel   -> cancel
/// POST /{id}/convert  -> convert
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(option::list_active))
        .route("/{id}/cancel", post(option::cancel))
        .route("/{id}/convert", post(option::convert))
}
