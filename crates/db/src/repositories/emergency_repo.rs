//! Repository for the `emergency_maintenance` table.

use residence_core::status::EMERGENCY_RESOLVED;
use residence_core::types::DbId;
use sqlx::PgPool;

use crate::filter::ListFilter;
use crate::models::emergency::{CreateEmergencyReport, EmergencyReport, UpdateEmergencyReport};

const COLUMNS: &str = "id, title, description, location, priority, status, reported_by, \
                       reported_at, resolved_at, created_at, updated_at";

const KEYWORD_FILTER: &str =
    "($1::TEXT IS NULL OR title ILIKE $1 OR description ILIKE $1 OR location ILIKE $1)";

/// Provides CRUD operations for emergency maintenance reports.
pub struct EmergencyRepo;

impl EmergencyRepo {
    /// File a new report in the `reported` state.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEmergencyReport,
        priority: &str,
        reported_by: DbId,
    ) -> Result<EmergencyReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO emergency_maintenance
                (title, description, location, priority, reported_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmergencyReport>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(priority)
            .bind(reported_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EmergencyReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM emergency_maintenance WHERE id = $1");
        sqlx::query_as::<_, EmergencyReport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &ListFilter,
    ) -> Result<Vec<EmergencyReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM emergency_maintenance
             WHERE {KEYWORD_FILTER}
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, EmergencyReport>(&query)
            .bind(filter.pattern())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ListFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM emergency_maintenance WHERE {KEYWORD_FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.pattern())
            .fetch_one(pool)
            .await
    }

    /// Overwrite a report.
    ///
    /// `resolved_at` keeps its first stamp while the status stays `resolved`,
    /// is set when the report first becomes `resolved`, and is cleared when
    /// the report is reopened.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEmergencyReport,
    ) -> Result<Option<EmergencyReport>, sqlx::Error> {
        let query = format!(
            "UPDATE emergency_maintenance SET
                title = $2,
                description = $3,
                location = $4,
                priority = $5,
                status = $6,
                resolved_at = CASE WHEN $6 = $7 THEN COALESCE(resolved_at, NOW()) ELSE NULL END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmergencyReport>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(&input.priority)
            .bind(&input.status)
            .bind(EMERGENCY_RESOLVED)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM emergency_maintenance WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
