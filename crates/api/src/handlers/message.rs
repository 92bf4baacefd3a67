//! Handlers for staff conversations with buyers and partners.
//!
//! Each buyer and each partner owns one conversation. Staff take part in
//! every conversation; a buyer or partner only in their own.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use yam_core::error::CoreError;
use yam_core::messaging::{count_unread_from, validate_body, MessageOwner, SenderType};
use yam_core::types::DbId;
use yam_db::models::message::{Message, SendMessage};
use yam_db::repositories::{AcquereurRepo, MessageRepo, PartenaireRepo};
use yam_events::ChangeEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const TABLE: &str = "messages";

#[derive(Debug, Serialize)]
pub struct Conversation {
    pub messages: Vec<Message>,
    /// Unread messages written by the other side, from the caller's view.
    pub unread: usize,
}

#[derive(Debug, Deserialize)]
pub struct UnreadParams {
    /// Author to count; defaults to `staff`.
    pub from: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread: i64,
}

fn ensure_participant(auth: &AuthUser, owner: MessageOwner) -> AppResult<()> {
    let allowed = auth.is_staff()
        || match owner {
            MessageOwner::Acquereur(id) => auth.acquereur_id == Some(id),
            MessageOwner::Partenaire(id) => auth.partenaire_id == Some(id),
        };
    if allowed {
        Ok(())
    } else {
        Err(AppError::forbidden("Not a participant of this conversation"))
    }
}

/// The sender type the caller writes as in `owner`'s conversation.
fn sender_for(auth: &AuthUser, owner: MessageOwner) -> SenderType {
    if auth.is_staff() {
        SenderType::Staff
    } else {
        owner.counterparty_sender()
    }
}

/// The author whose messages the caller has to read.
fn other_side(auth: &AuthUser, owner: MessageOwner) -> SenderType {
    if auth.is_staff() {
        owner.counterparty_sender()
    } else {
        SenderType::Staff
    }
}

/// 404 unless the buyer or partner owning the conversation exists.
async fn ensure_owner_exists(state: &AppState, owner: MessageOwner) -> AppResult<()> {
    let found = match owner {
        MessageOwner::Acquereur(id) => AcquereurRepo::find_by_id(&state.pool, id).await?.is_some(),
        MessageOwner::Partenaire(id) => {
            PartenaireRepo::find_by_id(&state.pool, id).await?.is_some()
        }
    };
    if found {
        Ok(())
    } else {
        let entity = match owner {
            MessageOwner::Acquereur(_) => "Acquereur",
            MessageOwner::Partenaire(_) => "Partenaire",
        };
        Err(AppError::not_found(entity, owner.id()))
    }
}

async fn list(state: &AppState, auth: &AuthUser, owner: MessageOwner) -> AppResult<Conversation> {
    ensure_participant(auth, owner)?;
    ensure_owner_exists(state, owner).await?;
    let messages = MessageRepo::list(&state.pool, owner).await?;
    let unread = count_unread_from(
        messages.iter().filter_map(|m| {
            SenderType::from_str_value(&m.sender_type)
                .ok()
                .map(|s| (s, m.is_read))
        }),
        other_side(auth, owner),
    );
    Ok(Conversation { messages, unread })
}

async fn send(
    state: &AppState,
    auth: &AuthUser,
    owner: MessageOwner,
    input: SendMessage,
) -> AppResult<Message> {
    ensure_participant(auth, owner)?;
    validate_body(&input.body)?;
    ensure_owner_exists(state, owner).await?;
    let sender = sender_for(auth, owner);
    let message =
        MessageRepo::create(&state.pool, owner, sender, Some(auth.user_id), input.body.trim())
            .await?;
    tracing::debug!(
        message_id = message.id,
        owner = owner.kind(),
        owner_id = owner.id(),
        sender = sender.as_str(),
        "Message sent"
    );
    state.notify(ChangeEvent::inserted(TABLE, message.id));
    Ok(message)
}

async fn unread(
    state: &AppState,
    auth: &AuthUser,
    owner: MessageOwner,
    params: UnreadParams,
) -> AppResult<UnreadCount> {
    ensure_participant(auth, owner)?;
    ensure_owner_exists(state, owner).await?;
    let from = match params.from.as_deref() {
        None => SenderType::Staff,
        Some(s) => SenderType::from_str_value(s).map_err(CoreError::Validation)?,
    };
    let unread = MessageRepo::count_unread(&state.pool, owner, from).await?;
    Ok(UnreadCount { unread })
}

/// GET /api/v1/acquereurs/{id}/messages
pub async fn list_for_acquereur(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Conversation>> {
    Ok(Json(list(&state, &auth, MessageOwner::Acquereur(id)).await?))
}

/// POST /api/v1/acquereurs/{id}/messages
pub async fn send_to_acquereur(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SendMessage>,
) -> AppResult<(StatusCode, Json<Message>)> {
    let message = send(&state, &auth, MessageOwner::Acquereur(id), input).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/v1/acquereurs/{id}/messages/unread-count?from=staff
pub async fn unread_for_acquereur(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<UnreadParams>,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let data = unread(&state, &auth, MessageOwner::Acquereur(id), params).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/partenaires/{id}/messages
pub async fn list_for_partenaire(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Conversation>> {
    Ok(Json(list(&state, &auth, MessageOwner::Partenaire(id)).await?))
}

/// POST /api/v1/partenaires/{id}/messages
pub async fn send_to_partenaire(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SendMessage>,
) -> AppResult<(StatusCode, Json<Message>)> {
    let message = send(&state, &auth, MessageOwner::Partenaire(id), input).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/v1/partenaires/{id}/messages/unread-count?from=staff
pub async fn unread_for_partenaire(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<UnreadParams>,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let data = unread(&state, &auth, MessageOwner::Partenaire(id), params).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/messages/{id}/read
///
/// Idempotent: reading an already read message leaves `read_at` unchanged.
/// Only the receiving side marks a message read; when its author's side
/// calls this the message is returned untouched.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Message>> {
    let message = MessageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Message", id))?;
    let owner = message
        .owner()
        .ok_or_else(|| AppError::InternalError(format!("Message {id} has no owner")))?;
    ensure_participant(&auth, owner)?;

    let author =
        SenderType::from_str_value(&message.sender_type).map_err(AppError::InternalError)?;
    if author != other_side(&auth, owner) {
        tracing::debug!(
            message_id = id,
            user_id = auth.user_id,
            "Author side cannot mark its own message read"
        );
        return Ok(Json(message));
    }

    if !MessageRepo::mark_read(&state.pool, id).await? {
        return Ok(Json(message));
    }
    state.notify(ChangeEvent::updated(TABLE, id));
    let message = MessageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Message", id))?;
    Ok(Json(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(role: &str, acquereur_id: Option<DbId>, partenaire_id: Option<DbId>) -> AuthUser {
        AuthUser {
            user_id: 7,
            role: role.into(),
            acquereur_id,
            partenaire_id,
        }
    }

    #[test]
    fn staff_write_as_staff_and_read_the_counterparty() {
        let staff = caller("admin", None, None);
        let owner = MessageOwner::Partenaire(3);
        assert_eq!(sender_for(&staff, owner), SenderType::Staff);
        assert_eq!(other_side(&staff, owner), SenderType::Partenaire);
        assert!(ensure_participant(&staff, owner).is_ok());
    }

    #[test]
    fn buyers_only_join_their_own_conversation() {
        let buyer = caller("acquereur", Some(5), None);
        assert!(ensure_participant(&buyer, MessageOwner::Acquereur(5)).is_ok());
        assert!(ensure_participant(&buyer, MessageOwner::Acquereur(6)).is_err());
        assert!(ensure_participant(&buyer, MessageOwner::Partenaire(5)).is_err());
        assert_eq!(sender_for(&buyer, MessageOwner::Acquereur(5)), SenderType::Acquereur);
        assert_eq!(other_side(&buyer, MessageOwner::Acquereur(5)), SenderType::Staff);
    }

    #[test]
    fn partners_read_staff_messages_only() {
        let partner = caller("partenaire", None, Some(9));
        let owner = MessageOwner::Partenaire(9);
        assert!(ensure_participant(&partner, owner).is_ok());
        assert_eq!(sender_for(&partner, owner), SenderType::Partenaire);
        assert_ne!(other_side(&partner, owner), SenderType::Partenaire);
    }
}
