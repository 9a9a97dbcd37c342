//! Repository for the `complaints` table.

use residence_core::status::COMPLAINT_DEFAULT_STATUS;
use residence_core::types::DbId;
use sqlx::PgPool;

use crate::filter::ListFilter;
use crate::models::complaint::{Complaint, CreateComplaint, UpdateComplaint};

const COLUMNS: &str =
    "id, user_id, title, content, category, status, response, created_at, updated_at";

const KEYWORD_FILTER: &str =
    "($1::TEXT IS NULL OR title ILIKE $1 OR content ILIKE $1 OR status ILIKE $1)";

/// Provides CRUD operations for complaints.
pub struct ComplaintRepo;

impl ComplaintRepo {
    /// File a complaint on behalf of `user_id` in the default status.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateComplaint,
    ) -> Result<Complaint, sqlx::Error> {
        let query = format!(
            "INSERT INTO complaints (user_id, title, content, category, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.category)
            .bind(COMPLAINT_DEFAULT_STATUS)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complaints WHERE id = $1");
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Complaint>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM complaints
             WHERE {KEYWORD_FILTER}
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(filter.pattern())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ListFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM complaints WHERE {KEYWORD_FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.pattern())
            .fetch_one(pool)
            .await
    }

    /// Complaints filed by one user, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Complaint>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM complaints WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateComplaint,
    ) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!(
            "UPDATE complaints SET
                title = $2,
                content = $3,
                category = $4,
                status = $5,
                response = $6,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.category)
            .bind(&input.status)
            .bind(&input.response)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM complaints WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
