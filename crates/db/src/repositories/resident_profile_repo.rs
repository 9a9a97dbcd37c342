//! Repository for resident profiles (`personal_info` + `family_members`).

use std::collections::HashMap;

use residence_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::filter::ListFilter;
use crate::models::resident_profile::{
    FamilyMember, FamilyMemberInput, PersonalInfo, ResidentProfile, ResidentProfileInput,
};

const COLUMNS: &str = "id, user_id, full_name, date_of_birth, gender, id_number, phone, \
                       occupation, hometown, created_at, updated_at";

const FAMILY_COLUMNS: &str =
    "id, personal_info_id, full_name, relationship, date_of_birth, phone, created_at";

const KEYWORD_FILTER: &str =
    "($1::TEXT IS NULL OR full_name ILIKE $1 OR id_number ILIKE $1 OR phone ILIKE $1)";

/// Provides CRUD operations for resident profiles.
///
/// Every write touches both tables inside one transaction.
pub struct ResidentProfileRepo;

impl ResidentProfileRepo {
    /// Register a profile for `user_id` together with its household.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &ResidentProfileInput,
    ) -> Result<ResidentProfile, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO personal_info
                (user_id, full_name, date_of_birth, gender, id_number, phone, occupation, hometown)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let personal = sqlx::query_as::<_, PersonalInfo>(&query)
            .bind(user_id)
            .bind(&input.full_name)
            .bind(input.date_of_birth)
            .bind(&input.gender)
            .bind(&input.id_number)
            .bind(&input.phone)
            .bind(&input.occupation)
            .bind(&input.hometown)
            .fetch_one(&mut *tx)
            .await?;

        let family_members = insert_family(&mut *tx, personal.id, &input.family_members).await?;

        tx.commit().await?;
        Ok(ResidentProfile {
            personal,
            family_members,
        })
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ResidentProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM personal_info WHERE id = $1");
        let personal = sqlx::query_as::<_, PersonalInfo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match personal {
            Some(personal) => Ok(Some(Self::with_family(pool, personal).await?)),
            None => Ok(None),
        }
    }

    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<ResidentProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM personal_info WHERE user_id = $1");
        let personal = sqlx::query_as::<_, PersonalInfo>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        match personal {
            Some(personal) => Ok(Some(Self::with_family(pool, personal).await?)),
            None => Ok(None),
        }
    }

    /// Look up only the owning user of a profile, for access checks.
    pub async fn owner_of(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT user_id FROM personal_info WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List profiles with their households. Family members for the whole
    /// page are fetched in one query.
    pub async fn list(
        pool: &PgPool,
        filter: &ListFilter,
    ) -> Result<Vec<ResidentProfile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM personal_info
             WHERE {KEYWORD_FILTER}
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        let people = sqlx::query_as::<_, PersonalInfo>(&query)
            .bind(filter.pattern())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = people.iter().map(|p| p.id).collect();
        let query = format!(
            "SELECT {FAMILY_COLUMNS} FROM family_members
             WHERE personal_info_id = ANY($1)
             ORDER BY id"
        );
        let members = sqlx::query_as::<_, FamilyMember>(&query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let mut by_profile: HashMap<DbId, Vec<FamilyMember>> = HashMap::new();
        for member in members {
            by_profile
                .entry(member.personal_info_id)
                .or_default()
                .push(member);
        }

        Ok(people
            .into_iter()
            .map(|personal| {
                let family_members = by_profile.remove(&personal.id).unwrap_or_default();
                ResidentProfile {
                    personal,
                    family_members,
                }
            })
            .collect())
    }

    pub async fn count(pool: &PgPool, filter: &ListFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM personal_info WHERE {KEYWORD_FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.pattern())
            .fetch_one(pool)
            .await
    }

    /// Overwrite personal fields and replace the household list.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ResidentProfileInput,
    ) -> Result<Option<ResidentProfile>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE personal_info SET
                full_name = $2,
                date_of_birth = $3,
                gender = $4,
                id_number = $5,
                phone = $6,
                occupation = $7,
                hometown = $8,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(personal) = sqlx::query_as::<_, PersonalInfo>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(input.date_of_birth)
            .bind(&input.gender)
            .bind(&input.id_number)
            .bind(&input.phone)
            .bind(&input.occupation)
            .bind(&input.hometown)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM family_members WHERE personal_info_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let family_members = insert_family(&mut *tx, id, &input.family_members).await?;

        tx.commit().await?;
        Ok(Some(ResidentProfile {
            personal,
            family_members,
        }))
    }

    /// Delete a profile. Family members are removed by cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM personal_info WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn with_family(
        pool: &PgPool,
        personal: PersonalInfo,
    ) -> Result<ResidentProfile, sqlx::Error> {
        let query = format!(
            "SELECT {FAMILY_COLUMNS} FROM family_members WHERE personal_info_id = $1 ORDER BY id"
        );
        let family_members = sqlx::query_as::<_, FamilyMember>(&query)
            .bind(personal.id)
            .fetch_all(pool)
            .await?;
        Ok(ResidentProfile {
            personal,
            family_members,
        })
    }
}

async fn insert_family(
    conn: &mut PgConnection,
    personal_info_id: DbId,
    members: &[FamilyMemberInput],
) -> Result<Vec<FamilyMember>, sqlx::Error> {
    let query = format!(
        "INSERT INTO family_members (personal_info_id, full_name, relationship, date_of_birth, phone)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {FAMILY_COLUMNS}"
    );
    let mut inserted = Vec::with_capacity(members.len());
    for member in members {
        let row = sqlx::query_as::<_, FamilyMember>(&query)
            .bind(personal_info_id)
            .bind(&member.full_name)
            .bind(&member.relationship)
            .bind(member.date_of_birth)
            .bind(&member.phone)
            .fetch_one(&mut *conn)
            .await?;
        inserted.push(row);
    }
    Ok(inserted)
}
