//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod acquereur;
pub mod faq;
pub mod lot;
pub mod lot_option;
pub mod message;
pub mod milestone;
pub mod partenaire;
pub mod password_reset;
pub mod residence;
pub mod user;
pub mod vendeur;
