//! FAQ entry model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yam_core::types::{DbId, Timestamp};

/// A row from the `faqs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Faq {
    pub id: DbId,
    pub question: String,
    pub reponse: String,
    pub categorie: Option<String>,
    pub ordre: i32,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFaq {
    pub question: String,
    pub reponse: String,
    pub categorie: Option<String>,
    pub ordre: Option<i32>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFaq {
    pub question: Option<String>,
    pub reponse: Option<String>,
    pub categorie: Option<String>,
    pub ordre: Option<i32>,
    pub is_published: Option<bool>,
}
