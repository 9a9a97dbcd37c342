//! Repository for the `meetings` table and `meeting_registrations`.

use residence_core::types::DbId;
use sqlx::PgPool;

use crate::filter::ListFilter;
use crate::models::mail::NewMail;
use crate::models::meeting::{CreateMeeting, Meeting, MeetingRegistration, UpdateMeeting};
use crate::repositories::MailOutboxRepo;

const COLUMNS: &str = "id, title, description, location, meeting_at, organizer, capacity, \
                       created_at, updated_at";

const KEYWORD_FILTER: &str =
    "($1::TEXT IS NULL OR title ILIKE $1 OR location ILIKE $1 OR organizer ILIKE $1)";

const REGISTRATION_SELECT: &str = "SELECT r.id, r.meeting_id, r.user_id, u.name, u.email, \
                                   r.created_at \
                                   FROM meeting_registrations r \
                                   JOIN users u ON u.id = r.user_id";

/// Result of a registration attempt.
#[derive(Debug)]
pub enum RegistrationOutcome {
    Registered(MeetingRegistration),
    MeetingNotFound,
    AlreadyRegistered,
    Full,
}

/// Provides CRUD operations for meetings and attendee registration.
pub struct MeetingRepo;

impl MeetingRepo {
    pub async fn create(pool: &PgPool, input: &CreateMeeting) -> Result<Meeting, sqlx::Error> {
        let query = format!(
            "INSERT INTO meetings (title, description, location, meeting_at, organizer, capacity)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.meeting_at)
            .bind(&input.organizer)
            .bind(input.capacity)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Meeting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM meetings WHERE id = $1");
        sqlx::query_as::<_, Meeting>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Meeting>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM meetings
             WHERE {KEYWORD_FILTER}
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(filter.pattern())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ListFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM meetings WHERE {KEYWORD_FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.pattern())
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMeeting,
    ) -> Result<Option<Meeting>, sqlx::Error> {
        let query = format!(
            "UPDATE meetings SET
                title = $2,
                description = $3,
                location = $4,
                meeting_at = $5,
                organizer = $6,
                capacity = $7,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.meeting_at)
            .bind(&input.organizer)
            .bind(input.capacity)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM meetings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Registrations
    // -----------------------------------------------------------------------

    /// Register `user_id` for a meeting and queue the confirmation email
    /// produced by `confirmation`.
    ///
    /// The meeting row is locked `FOR UPDATE` so concurrent registrations
    /// serialize on the capacity check. Nothing is written unless the
    /// outcome is [`RegistrationOutcome::Registered`].
    pub async fn register<F>(
        pool: &PgPool,
        meeting_id: DbId,
        user_id: DbId,
        confirmation: F,
    ) -> Result<RegistrationOutcome, sqlx::Error>
    where
        F: FnOnce(&Meeting, &MeetingRegistration) -> NewMail,
    {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM meetings WHERE id = $1 FOR UPDATE");
        let Some(meeting) = sqlx::query_as::<_, Meeting>(&query)
            .bind(meeting_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(RegistrationOutcome::MeetingNotFound);
        };

        let registered: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM meeting_registrations WHERE meeting_id = $1 AND user_id = $2)",
        )
        .bind(meeting_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        if registered {
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }

        if let Some(capacity) = meeting.capacity {
            let taken: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM meeting_registrations WHERE meeting_id = $1")
                    .bind(meeting_id)
                    .fetch_one(&mut *tx)
                    .await?;
            if taken >= i64::from(capacity) {
                return Ok(RegistrationOutcome::Full);
            }
        }

        let inserted: Option<DbId> = sqlx::query_scalar(
            "INSERT INTO meeting_registrations (meeting_id, user_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_meeting_registrations_meeting_user DO NOTHING
             RETURNING id",
        )
        .bind(meeting_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(registration_id) = inserted else {
            return Ok(RegistrationOutcome::AlreadyRegistered);
        };

        let query = format!("{REGISTRATION_SELECT} WHERE r.id = $1");
        let registration = sqlx::query_as::<_, MeetingRegistration>(&query)
            .bind(registration_id)
            .fetch_one(&mut *tx)
            .await?;

        MailOutboxRepo::enqueue(&mut *tx, &confirmation(&meeting, &registration)).await?;

        tx.commit().await?;
        Ok(RegistrationOutcome::Registered(registration))
    }

    /// Cancel a registration. Returns `false` if none existed.
    pub async fn unregister(
        pool: &PgPool,
        meeting_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM meeting_registrations WHERE meeting_id = $1 AND user_id = $2")
                .bind(meeting_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_registrations(
        pool: &PgPool,
        meeting_id: DbId,
    ) -> Result<Vec<MeetingRegistration>, sqlx::Error> {
        let query = format!("{REGISTRATION_SELECT} WHERE r.meeting_id = $1 ORDER BY r.id");
        sqlx::query_as::<_, MeetingRegistration>(&query)
            .bind(meeting_id)
            .fetch_all(pool)
            .await
    }
}
