//! Residents' meeting model, DTOs, and registrations.

use residence_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `meetings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Meeting {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub meeting_at: Timestamp,
    pub organizer: Option<String>,
    pub capacity: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMeeting {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    pub meeting_at: Timestamp,
    #[validate(length(max = 200))]
    pub organizer: Option<String>,
    /// `None` means unlimited seats.
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
}

pub type UpdateMeeting = CreateMeeting;

/// A registration joined with the attendee's contact details.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MeetingRegistration {
    pub id: DbId,
    pub meeting_id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
}
