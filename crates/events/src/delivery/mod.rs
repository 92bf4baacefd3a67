//! Outbound email: the SMTP transport and concurrent fan-out.

pub mod email;
pub mod fanout;
