//! Asset category model and DTOs.

use residence_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `asset_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetCategory {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an asset category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAssetCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
}

pub type UpdateAssetCategory = CreateAssetCategory;
