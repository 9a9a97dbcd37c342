//! Resident personal information and household members.
//!
//! A profile is one `personal_info` row plus zero or more `family_members`
//! rows. Both are always written together inside one transaction.

use residence_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `personal_info` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PersonalInfo {
    pub id: DbId,
    pub user_id: DbId,
    pub full_name: String,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
    pub id_number: Option<String>,
    pub phone: Option<String>,
    pub occupation: Option<String>,
    pub hometown: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `family_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FamilyMember {
    pub id: DbId,
    pub personal_info_id: DbId,
    pub full_name: String,
    pub relationship: String,
    pub date_of_birth: Option<Date>,
    pub phone: Option<String>,
    pub created_at: Timestamp,
}

/// A full profile as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ResidentProfile {
    #[serde(flatten)]
    pub personal: PersonalInfo,
    pub family_members: Vec<FamilyMember>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FamilyMemberInput {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(length(min = 1, max = 50))]
    pub relationship: String,
    pub date_of_birth: Option<Date>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
}

/// Personal fields plus the complete household list.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResidentProfileInput {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    pub date_of_birth: Option<Date>,
    #[validate(length(max = 20))]
    pub gender: Option<String>,
    #[validate(length(max = 50))]
    pub id_number: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub occupation: Option<String>,
    #[validate(length(max = 200))]
    pub hometown: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub family_members: Vec<FamilyMemberInput>,
}

/// Body of `POST /resident-profiles`.
///
/// `user_id` may only be supplied by administrators; residents always
/// register themselves.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateResidentProfile {
    pub user_id: Option<DbId>,
    #[serde(flatten)]
    #[validate(nested)]
    pub profile: ResidentProfileInput,
}

/// Body of `PUT /resident-profiles/{id}`: personal fields are overwritten
/// and the household list is replaced wholesale.
pub type UpdateResidentProfile = ResidentProfileInput;
