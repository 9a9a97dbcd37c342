//! Repository for the `residence_rules` table.

use residence_core::types::DbId;
use sqlx::PgPool;

use crate::filter::ListFilter;
use crate::models::rule::{CreateResidenceRule, ResidenceRule, UpdateResidenceRule};

const COLUMNS: &str = "id, title, content, category, effective_date, created_at, updated_at";

const KEYWORD_FILTER: &str =
    "($1::TEXT IS NULL OR title ILIKE $1 OR content ILIKE $1 OR category ILIKE $1)";

pub struct ResidenceRuleRepo;

impl ResidenceRuleRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateResidenceRule,
    ) -> Result<ResidenceRule, sqlx::Error> {
        let query = format!(
            "INSERT INTO residence_rules (title, content, category, effective_date)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ResidenceRule>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.category)
            .bind(input.effective_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ResidenceRule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM residence_rules WHERE id = $1");
        sqlx::query_as::<_, ResidenceRule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &ListFilter,
    ) -> Result<Vec<ResidenceRule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM residence_rules
             WHERE {KEYWORD_FILTER}
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ResidenceRule>(&query)
            .bind(filter.pattern())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ListFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM residence_rules WHERE {KEYWORD_FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.pattern())
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateResidenceRule,
    ) -> Result<Option<ResidenceRule>, sqlx::Error> {
        let query = format!(
            "UPDATE residence_rules SET
                title = $2,
                content = $3,
                category = $4,
                effective_date = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ResidenceRule>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.category)
            .bind(input.effective_date)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM residence_rules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
