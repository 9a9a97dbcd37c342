//! Vendor contract model and DTOs.

use residence_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `contracts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contract {
    pub id: DbId,
    pub vendor_id: DbId,
    pub title: String,
    pub start_date: Date,
    pub end_date: Date,
    pub value: Option<f64>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a contract. `end_date` may not precede `start_date`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContract {
    pub vendor_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub start_date: Date,
    pub end_date: Date,
    pub value: Option<f64>,
    pub status: String,
    pub notes: Option<String>,
}

pub type UpdateContract = CreateContract;
