//! Emergency maintenance report model and DTOs.

use residence_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `emergency_maintenance` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmergencyReport {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub priority: String,
    pub status: String,
    pub reported_by: Option<DbId>,
    pub reported_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a report. The reporter is taken from the caller's token
/// and the status always starts at `reported`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEmergencyReport {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    /// Defaults to `medium`.
    pub priority: Option<String>,
}

/// DTO for an administrator overwriting a report, including its status.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateEmergencyReport {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    pub priority: String,
    pub status: String,
}
