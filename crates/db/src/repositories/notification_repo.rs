//! Repository for the `notifications` table.

use residence_core::roles::TARGET_ALL;
use residence_core::status::outbox;
use residence_core::types::DbId;
use sqlx::PgPool;

use crate::filter::ListFilter;
use crate::models::notification::{CreateNotification, Notification, UpdateNotification};

const COLUMNS: &str = "id, title, content, target_role, created_by, created_at, updated_at";

const KEYWORD_FILTER: &str = "($1::TEXT IS NULL OR title ILIKE $1 OR content ILIKE $1)";

/// Provides CRUD operations and fan-out publishing for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification and queue one email per user of its target role.
    ///
    /// Both writes happen in a single transaction. Returns the stored
    /// notification and the number of emails queued.
    pub async fn publish(
        pool: &PgPool,
        created_by: Option<DbId>,
        input: &CreateNotification,
        subject: &str,
        body: &str,
    ) -> Result<(Notification, u64), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO notifications (title, content, target_role, created_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let notification = sqlx::query_as::<_, Notification>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.target_role)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        let queued = sqlx::query(
            "INSERT INTO mail_outbox (recipient, subject, body, status)
             SELECT email, $1, $2, $3 FROM users
             WHERE $4 = $5 OR role = $4
             ORDER BY id",
        )
        .bind(subject)
        .bind(body)
        .bind(outbox::PENDING)
        .bind(&notification.target_role)
        .bind(TARGET_ALL)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        Ok((notification, queued))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &ListFilter,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE {KEYWORD_FILTER}
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(filter.pattern())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ListFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM notifications WHERE {KEYWORD_FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.pattern())
            .fetch_one(pool)
            .await
    }

    /// Notifications visible to `role`: those targeting it or everyone,
    /// newest first.
    pub async fn list_for_role(pool: &PgPool, role: &str) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE target_role = $1 OR target_role = $2
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(role)
            .bind(TARGET_ALL)
            .fetch_all(pool)
            .await
    }

    /// Edit a published notification. Already queued emails are not resent.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNotification,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!(
            "UPDATE notifications SET
                title = $2,
                content = $3,
                target_role = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.target_role)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
