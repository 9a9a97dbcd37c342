//! Repository for the `rooms` table and its `room_residents` association.

use residence_core::types::DbId;
use sqlx::PgPool;

use crate::filter::ListFilter;
use crate::models::room::{CreateRoom, Room, RoomResident, UpdateRoom};

const COLUMNS: &str = "id, room_number, floor, area, room_type, status, created_at, updated_at";

const KEYWORD_FILTER: &str =
    "($1::TEXT IS NULL OR room_number ILIKE $1 OR room_type ILIKE $1 OR status ILIKE $1)";

/// Residents are reported with their user contact details.
const RESIDENT_SELECT: &str = "SELECT rr.room_id, rr.user_id, u.name, u.email, u.phone, \
                               rr.created_at AS assigned_at \
                               FROM room_residents rr \
                               JOIN users u ON u.id = rr.user_id";

/// Result of assigning a user to a room.
#[derive(Debug)]
pub enum AssignOutcome {
    Assigned(RoomResident),
    RoomNotFound,
    UserNotFound,
    AlreadyAssigned,
}

/// Provides CRUD operations for rooms and resident assignment.
pub struct RoomRepo;

impl RoomRepo {
    pub async fn create(pool: &PgPool, input: &CreateRoom) -> Result<Room, sqlx::Error> {
        let query = format!(
            "INSERT INTO rooms (room_number, floor, area, room_type, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(&input.room_number)
            .bind(input.floor)
            .bind(input.area)
            .bind(&input.room_type)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM rooms WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Room>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rooms
             WHERE {KEYWORD_FILTER}
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(filter.pattern())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ListFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM rooms WHERE {KEYWORD_FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.pattern())
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRoom,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!(
            "UPDATE rooms SET
                room_number = $2,
                floor = $3,
                area = $4,
                room_type = $5,
                status = $6,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(&input.room_number)
            .bind(input.floor)
            .bind(input.area)
            .bind(&input.room_type)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a room. Resident assignments are removed by cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Residents
    // -----------------------------------------------------------------------

    pub async fn list_residents(
        pool: &PgPool,
        room_id: DbId,
    ) -> Result<Vec<RoomResident>, sqlx::Error> {
        let query = format!("{RESIDENT_SELECT} WHERE rr.room_id = $1 ORDER BY rr.id");
        sqlx::query_as::<_, RoomResident>(&query)
            .bind(room_id)
            .fetch_all(pool)
            .await
    }

    /// Assign a user to a room.
    ///
    /// Existence checks and the insert share one transaction; the room row
    /// is locked so a concurrent delete cannot slip between them.
    pub async fn add_resident(
        pool: &PgPool,
        room_id: DbId,
        user_id: DbId,
    ) -> Result<AssignOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let room: Option<DbId> = sqlx::query_scalar("SELECT id FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(room_id)
            .fetch_optional(&mut *tx)
            .await?;
        if room.is_none() {
            return Ok(AssignOutcome::RoomNotFound);
        }

        let user_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;
        if !user_exists {
            return Ok(AssignOutcome::UserNotFound);
        }

        let inserted: Option<DbId> = sqlx::query_scalar(
            "INSERT INTO room_residents (room_id, user_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_room_residents_room_user DO NOTHING
             RETURNING id",
        )
        .bind(room_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(assignment_id) = inserted else {
            return Ok(AssignOutcome::AlreadyAssigned);
        };

        let query = format!("{RESIDENT_SELECT} WHERE rr.id = $1");
        let resident = sqlx::query_as::<_, RoomResident>(&query)
            .bind(assignment_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(AssignOutcome::Assigned(resident))
    }

    pub async fn remove_resident(
        pool: &PgPool,
        room_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM room_residents WHERE room_id = $1 AND user_id = $2")
            .bind(room_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
