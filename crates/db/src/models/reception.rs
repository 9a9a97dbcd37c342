//! Front-desk reception log model and DTOs.

use residence_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `receptions` table: one guest received for a resident.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reception {
    pub id: DbId,
    pub resident_id: DbId,
    pub guest_name: String,
    pub guest_phone: Option<String>,
    pub purpose: Option<String>,
    pub check_in_at: Timestamp,
    pub check_out_at: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReception {
    pub resident_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub guest_name: String,
    #[validate(length(max = 30))]
    pub guest_phone: Option<String>,
    pub purpose: Option<String>,
    /// Defaults to the time of insertion.
    pub check_in_at: Option<Timestamp>,
    pub check_out_at: Option<Timestamp>,
    pub notes: Option<String>,
}

pub type UpdateReception = CreateReception;
