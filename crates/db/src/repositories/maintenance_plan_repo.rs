//! Repository for the `maintenance_plans` table.

use residence_core::types::DbId;
use sqlx::PgPool;

use crate::filter::ListFilter;
use crate::models::maintenance_plan::{
    CreateMaintenancePlan, MaintenancePlan, UpdateMaintenancePlan,
};

const COLUMNS: &str = "id, asset_id, vendor_id, title, description, frequency, next_due_date, \
                       status, created_at, updated_at";

const KEYWORD_FILTER: &str =
    "($1::TEXT IS NULL OR title ILIKE $1 OR description ILIKE $1 OR status ILIKE $1)";

/// Provides CRUD operations for maintenance plans.
pub struct MaintenancePlanRepo;

impl MaintenancePlanRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateMaintenancePlan,
    ) -> Result<MaintenancePlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO maintenance_plans
                (asset_id, vendor_id, title, description, frequency, next_due_date, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenancePlan>(&query)
            .bind(input.asset_id)
            .bind(input.vendor_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.frequency)
            .bind(input.next_due_date)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MaintenancePlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maintenance_plans WHERE id = $1");
        sqlx::query_as::<_, MaintenancePlan>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM maintenance_plans WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &ListFilter,
    ) -> Result<Vec<MaintenancePlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_plans
             WHERE {KEYWORD_FILTER}
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, MaintenancePlan>(&query)
            .bind(filter.pattern())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ListFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM maintenance_plans WHERE {KEYWORD_FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.pattern())
            .fetch_one(pool)
            .await
    }

    /// Overwrite a plan. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMaintenancePlan,
    ) -> Result<Option<MaintenancePlan>, sqlx::Error> {
        let query = format!(
            "UPDATE maintenance_plans SET
                asset_id = $2,
                vendor_id = $3,
                title = $4,
                description = $5,
                frequency = $6,
                next_due_date = $7,
                status = $8,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenancePlan>(&query)
            .bind(id)
            .bind(input.asset_id)
            .bind(input.vendor_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.frequency)
            .bind(input.next_due_date)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM maintenance_plans WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
