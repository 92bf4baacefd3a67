pub mod acquereur;
pub mod auth;
pub mod dashboard;
pub mod faq;
pub mod functions;
pub mod health;
pub mod lot;
pub mod message;
pub mod milestone;
pub mod option;
pub mod partenaire;
pub mod residence;
pub mod vendeur;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /ws                                              change-event push
///
/// /auth/login                                      login (public)
/// /auth/me                                         current user
///
/// /residences, /vendeurs, /partenaires,
/// /acquereurs, /lots, /faqs                        CRUD
///
/// /lots/{id}/options                               place option (POST)
/// /options                                         active options
/// /options/{id}/cancel | /convert                  option lifecycle (POST)
///
/// /acquereurs/{id}/lots/{lot_id}/milestones        list, create defaults
/// /acquereurs/{id}/lots/{lot_id}/milestones/progress
/// /milestones/{id}/validate | /complete            step transitions (POST)
///
/// /acquereurs/{id}/messages                        list, send
/// /acquereurs/{id}/messages/unread-count
/// /partenaires/{id}/messages                       list, send
/// /partenaires/{id}/messages/unread-count
/// /messages/{id}/read                              mark read (POST)
///
/// /dashboard/sales                                 sales summary
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/auth", auth::router())
        .nest("/residences", residence::router())
        .nest("/vendeurs", vendeur::router())
        .nest("/partenaires", partenaire::router())
        .nest("/acquereurs", acquereur::router())
        .nest("/lots", lot::router())
        .nest("/options", option::router())
        .nest("/milestones", milestone::router())
        .nest("/messages", message::router())
        .nest("/faqs", faq::router())
        .nest("/dashboard", dashboard::router())
}
