//! Repository for the `maintenance_history` table.

use residence_core::types::DbId;
use sqlx::PgPool;

use crate::filter::ListFilter;
use crate::models::maintenance_history::{
    CreateMaintenanceRecord, MaintenanceRecord, UpdateMaintenanceRecord,
};

const COLUMNS: &str = "id, asset_id, plan_id, performed_on, description, cost, performed_by, \
                       created_at, updated_at";

const KEYWORD_FILTER: &str = "($1::TEXT IS NULL OR description ILIKE $1 OR performed_by ILIKE $1)";

/// Provides CRUD operations for maintenance history records.
pub struct MaintenanceHistoryRepo;

impl MaintenanceHistoryRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateMaintenanceRecord,
    ) -> Result<MaintenanceRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO maintenance_history
                (asset_id, plan_id, performed_on, description, cost, performed_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(input.asset_id)
            .bind(input.plan_id)
            .bind(input.performed_on)
            .bind(&input.description)
            .bind(input.cost)
            .bind(&input.performed_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maintenance_history WHERE id = $1");
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &ListFilter,
    ) -> Result<Vec<MaintenanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_history
             WHERE {KEYWORD_FILTER}
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(filter.pattern())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ListFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM maintenance_history WHERE {KEYWORD_FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.pattern())
            .fetch_one(pool)
            .await
    }

    /// Work performed on one asset, most recent first.
    pub async fn list_by_asset(
        pool: &PgPool,
        asset_id: DbId,
    ) -> Result<Vec<MaintenanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_history
             WHERE asset_id = $1
             ORDER BY performed_on DESC, id DESC"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(asset_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMaintenanceRecord,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE maintenance_history SET
                asset_id = $2,
                plan_id = $3,
                performed_on = $4,
                description = $5,
                cost = $6,
                performed_by = $7,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(id)
            .bind(input.asset_id)
            .bind(input.plan_id)
            .bind(input.performed_on)
            .bind(&input.description)
            .bind(input.cost)
            .bind(&input.performed_by)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM maintenance_history WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
