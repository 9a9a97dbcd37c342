//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint in the users
//! migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_RESIDENT: &str = "resident";

/// Every role a user row may carry.
pub const USER_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_RESIDENT];

/// Notification audience meaning "every user regardless of role".
pub const TARGET_ALL: &str = "all";

/// Valid notification audiences.
pub const NOTIFICATION_TARGETS: &[&str] = &[TARGET_ALL, ROLE_ADMIN, ROLE_RESIDENT];
