//! Repository for the `mail_outbox` table.
//!
//! Producers enqueue inside their own transaction via [`MailOutboxRepo::enqueue`]
//! so a message exists if and only if the business row that triggered it
//! was committed. The dispatcher then claims due rows in batches.

use residence_core::status::outbox;
use residence_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::mail::{NewMail, OutboxMessage};

const COLUMNS: &str = "id, recipient, subject, body, status, attempts, last_error, \
                       next_attempt_at, created_at, sent_at";

pub struct MailOutboxRepo;

impl MailOutboxRepo {
    /// Queue one message on an open connection or transaction.
    pub async fn enqueue(conn: &mut PgConnection, mail: &NewMail) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO mail_outbox (recipient, subject, body) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&mail.recipient)
        .bind(&mail.subject)
        .bind(&mail.body)
        .fetch_one(conn)
        .await
    }

    /// Claim up to `batch` due messages.
    ///
    /// Claimed rows get `next_attempt_at` pushed `lease_secs` into the future
    /// so a second dispatcher (or this one after a crash) does not pick them
    /// up again while delivery is in flight. `SKIP LOCKED` lets concurrent
    /// claimers partition the queue without blocking.
    pub async fn claim_due(
        pool: &PgPool,
        batch: i64,
        lease_secs: f64,
    ) -> Result<Vec<OutboxMessage>, sqlx::Error> {
        let query = format!(
            "UPDATE mail_outbox
             SET next_attempt_at = NOW() + make_interval(secs => $3)
             WHERE id IN (
                 SELECT id FROM mail_outbox
                 WHERE status = $1 AND next_attempt_at <= NOW()
                 ORDER BY next_attempt_at, id
                 LIMIT $2
                 FOR UPDATE SKIP LOCKED
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OutboxMessage>(&query)
            .bind(outbox::PENDING)
            .bind(batch)
            .bind(lease_secs)
            .fetch_all(pool)
            .await
    }

    pub async fn mark_sent(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE mail_outbox
             SET status = $2, attempts = attempts + 1, last_error = NULL, sent_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(outbox::SENT)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Record a failed attempt and schedule the next one `delay_secs` from now.
    pub async fn schedule_retry(
        pool: &PgPool,
        id: DbId,
        error: &str,
        delay_secs: f64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE mail_outbox
             SET attempts = attempts + 1,
                 last_error = $2,
                 next_attempt_at = NOW() + make_interval(secs => $3)
             WHERE id = $1",
        )
        .bind(id)
        .bind(error)
        .bind(delay_secs)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Record a final failed attempt; the row is not retried again.
    pub async fn mark_failed(pool: &PgPool, id: DbId, error: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE mail_outbox
             SET status = $3, attempts = attempts + 1, last_error = $2
             WHERE id = $1",
        )
        .bind(id)
        .bind(error)
        .bind(outbox::FAILED)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<OutboxMessage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mail_outbox WHERE id = $1");
        sqlx::query_as::<_, OutboxMessage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Messages addressed to one recipient, oldest first.
    pub async fn list_for_recipient(
        pool: &PgPool,
        recipient: &str,
    ) -> Result<Vec<OutboxMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mail_outbox WHERE LOWER(recipient) = LOWER($1) ORDER BY id"
        );
        sqlx::query_as::<_, OutboxMessage>(&query)
            .bind(recipient)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_status(pool: &PgPool, status: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM mail_outbox WHERE status = $1")
            .bind(status)
            .fetch_one(pool)
            .await
    }
}
