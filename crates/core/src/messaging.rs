//! Staff <-> acquéreur / partenaire conversations.
//!
//! A conversation belongs to exactly one owner ([`MessageOwner`]). Messages
//! are append-only; the only mutation is flipping `is_read` from `false` to
//! `true`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

pub const SENDER_STAFF: &str = "staff";
pub const SENDER_ACQUEREUR: &str = "acquereur";
pub const SENDER_PARTENAIRE: &str = "partenaire";

pub const OWNER_ACQUEREUR: &str = "acquereur";
pub const OWNER_PARTENAIRE: &str = "partenaire";

/// Maximum message body length in characters.
pub const MAX_BODY_LENGTH: usize = 5000;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderType {
    Staff,
    Acquereur,
    Partenaire,
}

impl SenderType {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            SENDER_STAFF => Ok(Self::Staff),
            SENDER_ACQUEREUR => Ok(Self::Acquereur),
            SENDER_PARTENAIRE => Ok(Self::Partenaire),
            _ => Err(format!("Invalid sender type '{s}'")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => SENDER_STAFF,
            Self::Acquereur => SENDER_ACQUEREUR,
            Self::Partenaire => SENDER_PARTENAIRE,
        }
    }
}

/// The counterparty a conversation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOwner {
    Acquereur(DbId),
    Partenaire(DbId),
}

impl MessageOwner {
    /// Rebuild an owner from a message's `acquereur_id` / `partenaire_id`.
    /// Exactly one of them must be set.
    pub fn from_columns(acquereur_id: Option<DbId>, partenaire_id: Option<DbId>) -> Option<Self> {
        match (acquereur_id, partenaire_id) {
            (Some(id), None) => Some(Self::Acquereur(id)),
            (None, Some(id)) => Some(Self::Partenaire(id)),
            _ => None,
        }
    }

    /// `acquereur` or `partenaire`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Acquereur(_) => OWNER_ACQUEREUR,
            Self::Partenaire(_) => OWNER_PARTENAIRE,
        }
    }

    pub fn id(&self) -> DbId {
        match self {
            Self::Acquereur(id) | Self::Partenaire(id) => *id,
        }
    }

    /// The sender type used when the counterparty (not staff) writes.
    pub fn counterparty_sender(&self) -> SenderType {
        match self {
            Self::Acquereur(_) => SenderType::Acquereur,
            Self::Partenaire(_) => SenderType::Partenaire,
        }
    }
}

/// Validate a message body: non-blank and at most [`MAX_BODY_LENGTH`] chars.
pub fn validate_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation("Message body must not be empty".into()));
    }
    if body.chars().count() > MAX_BODY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Message body must be at most {MAX_BODY_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Count unread messages authored by `sender` among `(sender, is_read)` pairs.
pub fn count_unread_from<I>(messages: I, sender: SenderType) -> usize
where
    I: IntoIterator<Item = (SenderType, bool)>,
{
    messages
        .into_iter()
        .filter(|(s, is_read)| *s == sender && !is_read)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_from_columns() {
        assert_eq!(MessageOwner::from_columns(Some(3), None), Some(MessageOwner::Acquereur(3)));
        assert_eq!(MessageOwner::from_columns(None, Some(4)), Some(MessageOwner::Partenaire(4)));
        assert_eq!(MessageOwner::from_columns(Some(3), Some(4)), None);
        assert_eq!(MessageOwner::from_columns(None, None), None);
    }

    #[test]
    fn owner_kind_and_counterparty() {
        let owner = MessageOwner::Acquereur(7);
        assert_eq!(owner.kind(), "acquereur");
        assert_eq!(owner.id(), 7);
        assert_eq!(owner.counterparty_sender(), SenderType::Acquereur);

        let owner = MessageOwner::Partenaire(3);
        assert_eq!(owner.kind(), "partenaire");
        assert_eq!(owner.counterparty_sender(), SenderType::Partenaire);
    }

    #[test]
    fn body_validation() {
        assert!(validate_body("Bonjour").is_ok());
        assert!(validate_body("   ").is_err());
        assert!(validate_body(&"x".repeat(MAX_BODY_LENGTH)).is_ok());
        assert!(validate_body(&"x".repeat(MAX_BODY_LENGTH + 1)).is_err());
    }

    #[test]
    fn unread_counts_only_staff_unread() {
        let messages = vec![
            (SenderType::Staff, false),
            (SenderType::Staff, true),
            (SenderType::Acquereur, false),
            (SenderType::Staff, false),
        ];
        assert_eq!(count_unread_from(messages.clone(), SenderType::Staff), 2);
        assert_eq!(count_unread_from(messages, SenderType::Acquereur), 1);
    }

    #[test]
    fn sender_type_round_trip() {
        for s in [SENDER_STAFF, SENDER_ACQUEREUR, SENDER_PARTENAIRE] {
            assert_eq!(SenderType::from_str_value(s).unwrap().as_str(), s);
        }
        assert!(SenderType::from_str_value("robot").is_err());
    }
}
