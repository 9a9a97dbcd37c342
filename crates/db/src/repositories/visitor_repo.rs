//! Repository for the `visitors` table.

use residence_core::types::DbId;
use sqlx::PgPool;

use crate::filter::ListFilter;
use crate::models::visitor::{CreateVisitor, UpdateVisitor, Visitor};

const COLUMNS: &str =
    "id, name, phone, id_number, room_id, visit_date, purpose, created_at, updated_at";

const KEYWORD_FILTER: &str =
    "($1::TEXT IS NULL OR name ILIKE $1 OR phone ILIKE $1 OR id_number ILIKE $1)";

/// Provides CRUD operations for the visitor log.
pub struct VisitorRepo;

impl VisitorRepo {
    pub async fn create(pool: &PgPool, input: &CreateVisitor) -> Result<Visitor, sqlx::Error> {
        let query = format!(
            "INSERT INTO visitors (name, phone, id_number, room_id, visit_date, purpose)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visitor>(&query)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.id_number)
            .bind(input.room_id)
            .bind(input.visit_date)
            .bind(&input.purpose)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Visitor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM visitors WHERE id = $1");
        sqlx::query_as::<_, Visitor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Visitor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM visitors
             WHERE {KEYWORD_FILTER}
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Visitor>(&query)
            .bind(filter.pattern())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ListFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM visitors WHERE {KEYWORD_FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.pattern())
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVisitor,
    ) -> Result<Option<Visitor>, sqlx::Error> {
        let query = format!(
            "UPDATE visitors SET
                name = $2,
                phone = $3,
                id_number = $4,
                room_id = $5,
                visit_date = $6,
                purpose = $7,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visitor>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.id_number)
            .bind(input.room_id)
            .bind(input.visit_date)
            .bind(&input.purpose)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM visitors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
