pub mod acquereur;
pub mod auth;
pub mod dashboard;
pub mod faq;
pub mod functions;
pub mod lot;
pub mod message;
pub mod milestone;
pub mod option;
pub mod partenaire;
pub mod residence;
pub mod vendeur;
