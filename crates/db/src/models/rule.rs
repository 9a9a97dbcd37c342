//! Residence rule (house rules) model and DTOs.

use residence_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `residence_rules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResidenceRule {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub effective_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateResidenceRule {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    pub effective_date: Option<Date>,
}

pub type UpdateResidenceRule = CreateResidenceRule;
