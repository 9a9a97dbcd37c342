//! Preventive maintenance plan model and DTOs.

use residence_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `maintenance_plans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaintenancePlan {
    pub id: DbId,
    pub asset_id: DbId,
    pub vendor_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub frequency: String,
    pub next_due_date: Date,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMaintenancePlan {
    pub asset_id: DbId,
    pub vendor_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub frequency: String,
    pub next_due_date: Date,
    pub status: String,
}

pub type UpdateMaintenancePlan = CreateMaintenancePlan;
