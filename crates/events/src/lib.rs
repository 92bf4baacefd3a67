//! YAM change events and outbound email.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`, carrying [`ChangeEvent`]s to WebSocket clients.
//! - [`delivery`] -- SMTP transport and best-effort email fan-out.

pub mod bus;
pub mod delivery;

pub use bus::{ChangeAction, ChangeEvent, EventBus};
pub use delivery::email::{EmailConfig, EmailError, LogMailer, MailTransport, OutgoingEmail, SmtpMailer};
pub use delivery::fanout::{send_all, FanoutFailure, FanoutReport};
