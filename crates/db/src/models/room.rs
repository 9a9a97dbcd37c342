//! Room model, DTOs, and the room/resident association.

use residence_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    pub room_number: String,
    pub floor: i32,
    pub area: Option<f64>,
    pub room_type: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoom {
    #[validate(length(min = 1, max = 20))]
    pub room_number: String,
    #[validate(range(min = -10, max = 300))]
    pub floor: i32,
    pub area: Option<f64>,
    #[validate(length(max = 50))]
    pub room_type: Option<String>,
    pub status: String,
}

pub type UpdateRoom = CreateRoom;

/// A resident assigned to a room, joined with the user's contact details.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoomResident {
    pub room_id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub assigned_at: Timestamp,
}

/// Body of `POST /rooms/{id}/residents`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddRoomResident {
    pub user_id: DbId,
}
