//! Broadcast notification model and DTOs.

use residence_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub target_role: String,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for publishing a notification. `target_role` must be one of
/// [`residence_core::roles::NOTIFICATION_TARGETS`].
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNotification {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    pub target_role: String,
}

pub type UpdateNotification = CreateNotification;

/// A freshly published notification plus the number of emails queued for it.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedNotification {
    #[serde(flatten)]
    pub notification: Notification,
    pub queued_emails: u64,
}
