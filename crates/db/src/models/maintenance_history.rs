//! Maintenance history (work actually performed) model and DTOs.

use residence_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `maintenance_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaintenanceRecord {
    pub id: DbId,
    pub asset_id: DbId,
    pub plan_id: Option<DbId>,
    pub performed_on: Date,
    pub description: String,
    pub cost: Option<f64>,
    pub performed_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMaintenanceRecord {
    pub asset_id: DbId,
    pub plan_id: Option<DbId>,
    pub performed_on: Date,
    #[validate(length(min = 1))]
    pub description: String,
    pub cost: Option<f64>,
    #[validate(length(max = 200))]
    pub performed_by: Option<String>,
}

pub type UpdateMaintenanceRecord = CreateMaintenanceRecord;
