//! Visitor log model and DTOs.

use residence_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `visitors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Visitor {
    pub id: DbId,
    pub name: String,
    pub phone: Option<String>,
    pub id_number: Option<String>,
    pub room_id: Option<DbId>,
    pub visit_date: Date,
    pub purpose: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVisitor {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 50))]
    pub id_number: Option<String>,
    pub room_id: Option<DbId>,
    pub visit_date: Date,
    pub purpose: Option<String>,
}

pub type UpdateVisitor = CreateVisitor;
