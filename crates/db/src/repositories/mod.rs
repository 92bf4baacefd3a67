//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod acquereur_repo;
pub mod export_repo;
pub mod faq_repo;
pub mod lot_option_repo;
pub mod lot_repo;
pub mod message_repo;
pub mod milestone_repo;
pub mod partenaire_repo;
pub mod password_reset_repo;
pub mod residence_repo;
pub mod user_repo;
pub mod vendeur_repo;

pub use acquereur_repo::AcquereurRepo;
pub use export_repo::ExportRepo;
pub use faq_repo::FaqRepo;
pub use lot_option_repo::LotOptionRepo;
pub use lot_repo::LotRepo;
pub use message_repo::MessageRepo;
pub use milestone_repo::MilestoneRepo;
pub use partenaire_repo::PartenaireRepo;
pub use password_reset_repo::PasswordResetRepo;
pub use residence_repo::ResidenceRepo;
pub use user_repo::UserRepo;
pub use vendeur_repo::VendeurRepo;
