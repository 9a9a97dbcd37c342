//! Repository for the `contracts` table.

use residence_core::types::DbId;
use sqlx::PgPool;

use crate::filter::ListFilter;
use crate::models::contract::{Contract, CreateContract, UpdateContract};

const COLUMNS: &str = "id, vendor_id, title, start_date, end_date, value, status, notes, \
                       created_at, updated_at";

const KEYWORD_FILTER: &str =
    "($1::TEXT IS NULL OR title ILIKE $1 OR status ILIKE $1 OR notes ILIKE $1)";

/// Provides CRUD operations for vendor contracts.
pub struct ContractRepo;

impl ContractRepo {
    pub async fn create(pool: &PgPool, input: &CreateContract) -> Result<Contract, sqlx::Error> {
        let query = format!(
            "INSERT INTO contracts
                (vendor_id, title, start_date, end_date, value, status, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(input.vendor_id)
            .bind(&input.title)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.value)
            .bind(&input.status)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contracts WHERE id = $1");
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Contract>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contracts
             WHERE {KEYWORD_FILTER}
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(filter.pattern())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ListFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM contracts WHERE {KEYWORD_FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.pattern())
            .fetch_one(pool)
            .await
    }

    /// List every contract signed with a vendor.
    pub async fn list_by_vendor(pool: &PgPool, vendor_id: DbId) -> Result<Vec<Contract>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contracts WHERE vendor_id = $1 ORDER BY id");
        sqlx::query_as::<_, Contract>(&query)
            .bind(vendor_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite a contract. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContract,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!(
            "UPDATE contracts SET
                vendor_id = $2,
                title = $3,
                start_date = $4,
                end_date = $5,
                value = $6,
                status = $7,
                notes = $8,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(input.vendor_id)
            .bind(&input.title)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.value)
            .bind(&input.status)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
