use axum::routing::{get, post};
use axum::Router;

use crate::handlers::functions::{expiry, export, notifications, password_reset, users};
use crate::state::AppState;

/// Routes mounted at `/functions`.
///
/// ```text
/// POST     /create-user                 -> users::create_user (admin)
/// POST     /send-password-reset         -> password_reset::send_password_reset (public)
/// POST     /reset-password-with-token   -> password_reset::reset_password_with_token (public)
/// GET      /export-lots                 -> export::export_lots
/// GET|POST /export-database             -> export::export_database (admin)
/// POST     /expire-options-cron         -> expiry::expire_options (cron secret or admin)
/// POST     /send-option-notification    -> notifications::send_option_notification
/// POST     /send-workflow-notification  -> notifications::send_workflow_notification
/// POST     /send-birthday-emails        -> notifications::send_birthday_emails (cron secret or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-user", post(users::create_user))
        .route("/send-password-reset", post(password_reset::send_password_reset))
        .route(
            "/reset-password-with-token",
            post(password_reset::reset_password_with_token),
        )
        .route("/export-lots", get(export::export_lots))
        .route(
            "/export-database",
            get(export::export_database).post(export::export_database),
        )
        .route("/expire-options-cron", post(expiry::expire_options))
        .route(
            "/send-option-notification",
            post(notifications::send_option_notification),
        )
        .route(
            "/send-workflow-notification",
            post(notifications::send_workflow_notification),
        )
        .route(
            "/send-birthday-emails",
            post(notifications::send_birthday_emails),
        )
}
