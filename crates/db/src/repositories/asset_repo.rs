//! Repository for the `assets` table.

use residence_core::types::DbId;
use sqlx::PgPool;

use crate::filter::ListFilter;
use crate::models::asset::{Asset, CreateAsset, UpdateAsset};

const COLUMNS: &str = "id, name, category_id, location, purchase_date, value, status, \
                       description, created_at, updated_at";

const KEYWORD_FILTER: &str =
    "($1::TEXT IS NULL OR name ILIKE $1 OR location ILIKE $1 OR status ILIKE $1)";

/// Provides CRUD operations for assets.
pub struct AssetRepo;

impl AssetRepo {
    pub async fn create(pool: &PgPool, input: &CreateAsset) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets
                (name, category_id, location, purchase_date, value, status, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(&input.name)
            .bind(input.category_id)
            .bind(&input.location)
            .bind(input.purchase_date)
            .bind(input.value)
            .bind(&input.status)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM assets WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assets
             WHERE {KEYWORD_FILTER}
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(filter.pattern())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ListFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM assets WHERE {KEYWORD_FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.pattern())
            .fetch_one(pool)
            .await
    }

    /// List every asset in a category.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE category_id = $1 ORDER BY id");
        sqlx::query_as::<_, Asset>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite an asset. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAsset,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET
                name = $2,
                category_id = $3,
                location = $4,
                purchase_date = $5,
                value = $6,
                status = $7,
                description = $8,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.category_id)
            .bind(&input.location)
            .bind(input.purchase_date)
            .bind(input.value)
            .bind(&input.status)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete an asset. Its maintenance plans and history go with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
