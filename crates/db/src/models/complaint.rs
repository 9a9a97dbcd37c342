//! Resident complaint model and DTOs.

use residence_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `complaints` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Complaint {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub status: String,
    pub response: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a complaint. The owner comes from the caller's token.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComplaint {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(max = 100))]
    pub category: Option<String>,
}

/// DTO for an administrator handling a complaint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateComplaint {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    pub status: String,
    pub response: Option<String>,
}
