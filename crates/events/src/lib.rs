//! Outgoing mail for the residence backend.
//!
//! - [`Mailer`]: the delivery seam; [`EmailDelivery`] is the SMTP
//!   implementation.
//! - [`OutboxDispatcher`]: background service that drains the
//!   `mail_outbox` table through a [`Mailer`], retrying with backoff.
//! - [`templates`]: subject/body rendering for the messages the API queues.

pub mod email;
pub mod mailer;
pub mod outbox;
pub mod templates;

pub use email::{EmailConfig, EmailDelivery, EmailError};
pub use mailer::Mailer;
pub use outbox::{OutboxConfig, OutboxDispatcher};
