//! Repository for the `asset_categories` table.

use residence_core::types::DbId;
use sqlx::PgPool;

use crate::filter::ListFilter;
use crate::models::asset_category::{AssetCategory, CreateAssetCategory, UpdateAssetCategory};

const COLUMNS: &str = "id, name, description, created_at, updated_at";

const KEYWORD_FILTER: &str = "($1::TEXT IS NULL OR name ILIKE $1 OR description ILIKE $1)";

/// Provides CRUD operations for asset categories.
pub struct AssetCategoryRepo;

impl AssetCategoryRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateAssetCategory,
    ) -> Result<AssetCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO asset_categories (name, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssetCategory>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AssetCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM asset_categories WHERE id = $1");
        sqlx::query_as::<_, AssetCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM asset_categories WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &ListFilter,
    ) -> Result<Vec<AssetCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM asset_categories
             WHERE {KEYWORD_FILTER}
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, AssetCategory>(&query)
            .bind(filter.pattern())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ListFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM asset_categories WHERE {KEYWORD_FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.pattern())
            .fetch_one(pool)
            .await
    }

    /// Overwrite a category. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAssetCategory,
    ) -> Result<Option<AssetCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE asset_categories SET
                name = $2,
                description = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssetCategory>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category. Fails with a foreign key violation while assets
    /// still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM asset_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
