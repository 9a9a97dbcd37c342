//! Repository for the `receptions` table.

use residence_core::types::DbId;
use sqlx::PgPool;

use crate::filter::ListFilter;
use crate::models::reception::{CreateReception, Reception, UpdateReception};

const COLUMNS: &str = "id, resident_id, guest_name, guest_phone, purpose, check_in_at, \
                       check_out_at, notes, created_at, updated_at";

const KEYWORD_FILTER: &str =
    "($1::TEXT IS NULL OR guest_name ILIKE $1 OR guest_phone ILIKE $1 OR purpose ILIKE $1)";

/// Provides CRUD operations for the reception log.
pub struct ReceptionRepo;

impl ReceptionRepo {
    /// Log a guest. `check_in_at` defaults to now.
    pub async fn create(pool: &PgPool, input: &CreateReception) -> Result<Reception, sqlx::Error> {
        let query = format!(
            "INSERT INTO receptions
                (resident_id, guest_name, guest_phone, purpose, check_in_at, check_out_at, notes)
             VALUES ($1, $2, $3, $4, COALESCE($5, NOW()), $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reception>(&query)
            .bind(input.resident_id)
            .bind(&input.guest_name)
            .bind(&input.guest_phone)
            .bind(&input.purpose)
            .bind(input.check_in_at)
            .bind(input.check_out_at)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reception>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM receptions WHERE id = $1");
        sqlx::query_as::<_, Reception>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Reception>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM receptions
             WHERE {KEYWORD_FILTER}
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Reception>(&query)
            .bind(filter.pattern())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ListFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM receptions WHERE {KEYWORD_FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.pattern())
            .fetch_one(pool)
            .await
    }

    /// Overwrite a reception entry. An omitted `check_in_at` keeps the
    /// stored value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReception,
    ) -> Result<Option<Reception>, sqlx::Error> {
        let query = format!(
            "UPDATE receptions SET
                resident_id = $2,
                guest_name = $3,
                guest_phone = $4,
                purpose = $5,
                check_in_at = COALESCE($6, check_in_at),
                check_out_at = $7,
                notes = $8,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reception>(&query)
            .bind(id)
            .bind(input.resident_id)
            .bind(&input.guest_name)
            .bind(&input.guest_phone)
            .bind(&input.purpose)
            .bind(input.check_in_at)
            .bind(input.check_out_at)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Stamp `check_out_at` with the current time.
    ///
    /// Returns `None` if the entry does not exist or was already checked out.
    pub async fn check_out(pool: &PgPool, id: DbId) -> Result<Option<Reception>, sqlx::Error> {
        let query = format!(
            "UPDATE receptions SET check_out_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND check_out_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reception>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM receptions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
