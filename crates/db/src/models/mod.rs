//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - An update DTO; updates overwrite every writable column, so most
//!   update DTOs are aliases of the create DTO

pub mod asset;
pub mod asset_category;
pub mod complaint;
pub mod contract;
pub mod emergency;
pub mod mail;
pub mod maintenance_history;
pub mod maintenance_plan;
pub mod meeting;
pub mod notification;
pub mod reception;
pub mod resident_profile;
pub mod room;
pub mod rule;
pub mod user;
pub mod vendor;
pub mod visitor;
