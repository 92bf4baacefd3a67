use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::auth::{user_from_token, AuthUser};
use crate::state::AppState;
use crate::ws::manager::WsManager;

/// Browsers cannot set headers on the upgrade request, so the JWT travels
/// as a query parameter.
#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub token: String,
}

/// Authenticate, then upgrade the connection to WebSocket.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let user = user_from_token(&params.token, &state)?;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager, user)))
}

/// Pump one connection until either side closes.
///
/// Outbound frames come from the manager channel; inbound frames are only
/// read to notice pongs and closes.
async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>, user: AuthUser) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id = user.user_id, "WebSocket connected");

    let mut rx = ws_manager
        .add(conn_id.clone(), user.user_id, user.role.clone())
        .await;

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}
