//! Mail outbox dispatcher.
//!
//! [`OutboxDispatcher`] runs as a background task. Every poll it claims a
//! batch of due `mail_outbox` rows, hands each to the [`Mailer`], and records
//! the result: `sent` on success, a rescheduled attempt with exponential
//! backoff on a transient failure, `failed` once attempts are exhausted or
//! the failure is permanent.

use std::sync::Arc;
use std::time::Duration;

use residence_db::models::mail::OutboxMessage;
use residence_db::repositories::MailOutboxRepo;
use residence_db::DbPool;
use tokio_util::sync::CancellationToken;

use crate::mailer::Mailer;

/// Default poll interval.
const DEFAULT_POLL_SECS: u64 = 10;

/// Default number of delivery attempts before a message is marked failed.
const DEFAULT_MAX_ATTEMPTS: i32 = 5;

/// Messages claimed per poll.
const DEFAULT_BATCH_SIZE: i64 = 50;

/// How long a claimed message stays invisible to other claimers.
const CLAIM_LEASE_SECS: f64 = 300.0;

/// Base retry delay; doubled for every previous attempt.
const RETRY_BASE_SECS: u64 = 30;

/// Upper bound on the retry delay.
const RETRY_MAX_SECS: u64 = 3600;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Dispatcher tuning.
#[derive(Debug, Clone)]
pub struct OutboxConfig {
    pub poll_interval: Duration,
    pub max_attempts: i32,
    pub batch_size: i64,
}

impl Default for OutboxConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl OutboxConfig {
    /// Load from environment variables.
    ///
    /// | Variable              | Default |
    /// |-----------------------|---------|
    /// | `OUTBOX_POLL_SECS`    | `10`    |
    /// | `OUTBOX_MAX_ATTEMPTS` | `5`     |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            poll_interval: std::env::var("OUTBOX_POLL_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.poll_interval),
            max_attempts: std::env::var("OUTBOX_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_attempts),
            batch_size: defaults.batch_size,
        }
    }
}

/// Delay before the next attempt, given how many attempts already failed
/// before this one: 30s, 60s, 120s, ... capped at one hour.
pub fn retry_delay(previous_attempts: i32) -> Duration {
    let exponent = previous_attempts.clamp(0, 16) as u32;
    let secs = RETRY_BASE_SECS.saturating_mul(1u64 << exponent);
    Duration::from_secs(secs.min(RETRY_MAX_SECS))
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Counts from a single drain pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrainStats {
    pub sent: usize,
    pub retried: usize,
    pub failed: usize,
}

/// Background service delivering queued mail.
pub struct OutboxDispatcher {
    pool: DbPool,
    mailer: Arc<dyn Mailer>,
    config: OutboxConfig,
}

impl OutboxDispatcher {
    pub fn new(pool: DbPool, mailer: Arc<dyn Mailer>, config: OutboxConfig) -> Self {
        Self {
            pool,
            mailer,
            config,
        }
    }

    /// Run the dispatch loop until `cancel` is triggered.
    ///
    /// A database error aborts the current pass only; the loop keeps going.
    pub async fn run(&self, cancel: CancellationToken) {
        tracing::info!(
            poll_secs = self.config.poll_interval.as_secs(),
            max_attempts = self.config.max_attempts,
            "Mail outbox dispatcher started"
        );

        let mut interval = tokio::time::interval(self.config.poll_interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Mail outbox dispatcher stopping");
                    break;
                }
                _ = interval.tick() => {
                    match self.drain_once().await {
                        Ok(stats) if stats != DrainStats::default() => {
                            tracing::info!(
                                sent = stats.sent,
                                retried = stats.retried,
                                failed = stats.failed,
                                "Mail outbox pass complete"
                            );
                        }
                        Ok(_) => tracing::debug!("Mail outbox: nothing due"),
                        Err(e) => tracing::error!(error = %e, "Mail outbox pass failed"),
                    }
                }
            }
        }
    }

    /// Claim one batch of due messages and attempt each of them.
    pub async fn drain_once(&self) -> Result<DrainStats, sqlx::Error> {
        let batch =
            MailOutboxRepo::claim_due(&self.pool, self.config.batch_size, CLAIM_LEASE_SECS)
                .await?;

        let mut stats = DrainStats::default();
        for message in &batch {
            self.dispatch(message, &mut stats).await?;
        }
        Ok(stats)
    }

    async fn dispatch(
        &self,
        message: &OutboxMessage,
        stats: &mut DrainStats,
    ) -> Result<(), sqlx::Error> {
        let result = self
            .mailer
            .send(&message.recipient, &message.subject, &message.body)
            .await;

        let error = match result {
            Ok(()) => {
                MailOutboxRepo::mark_sent(&self.pool, message.id).await?;
                stats.sent += 1;
                return Ok(());
            }
            Err(e) => e,
        };

        let attempts = message.attempts + 1;
        if error.is_permanent() || attempts >= self.config.max_attempts {
            tracing::warn!(
                outbox_id = message.id,
                recipient = %message.recipient,
                attempts,
                error = %error,
                "Giving up on queued email"
            );
            MailOutboxRepo::mark_failed(&self.pool, message.id, &error.to_string()).await?;
            stats.failed += 1;
        } else {
            let delay = retry_delay(message.attempts);
            tracing::debug!(
                outbox_id = message.id,
                attempts,
                retry_in_secs = delay.as_secs(),
                error = %error,
                "Queued email delivery failed, will retry"
            );
            MailOutboxRepo::schedule_retry(
                &self.pool,
                message.id,
                &error.to_string(),
                delay.as_secs_f64(),
            )
            .await?;
            stats.retried += 1;
        }
        Ok(())
    }
}
