//! Asset inventory model and DTOs.

use residence_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub name: String,
    pub category_id: DbId,
    pub location: String,
    pub purchase_date: Option<Date>,
    pub value: Option<f64>,
    pub status: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an asset. `status` must be one of
/// [`residence_core::status::ASSET_STATUSES`].
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAsset {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub category_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    pub purchase_date: Option<Date>,
    pub value: Option<f64>,
    pub status: String,
    pub description: Option<String>,
}

pub type UpdateAsset = CreateAsset;
