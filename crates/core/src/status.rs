//! Enumerated status vocabularies stored as plain text columns.
//!
//! Each list must match the corresponding `ck_*` check constraint in the
//! migrations. Handlers validate against these before touching the database
//! so callers get a 400 with the allowed values instead of a constraint
//! violation.

/// `assets.status`
pub const ASSET_STATUSES: &[&str] = &["in_use", "in_storage", "under_maintenance", "retired"];

/// `contracts.status`
pub const CONTRACT_STATUSES: &[&str] = &["pending", "active", "expired", "terminated"];

/// `maintenance_plans.frequency`
pub const MAINTENANCE_FREQUENCIES: &[&str] = &["daily", "weekly", "monthly", "quarterly", "yearly"];

/// `maintenance_plans.status`
pub const MAINTENANCE_PLAN_STATUSES: &[&str] =
    &["scheduled", "in_progress", "completed", "cancelled"];

/// `emergency_maintenance.priority`
pub const EMERGENCY_PRIORITIES: &[&str] = &["low", "medium", "high", "critical"];

/// `emergency_maintenance.status`
pub const EMERGENCY_STATUSES: &[&str] = &["reported", "in_progress", "resolved"];

/// Terminal emergency status; entering it stamps `resolved_at`.
pub const EMERGENCY_RESOLVED: &str = "resolved";

/// `complaints.status`
pub const COMPLAINT_STATUSES: &[&str] = &["pending", "in_progress", "resolved", "rejected"];

/// Status assigned to a freshly filed complaint.
pub const COMPLAINT_DEFAULT_STATUS: &str = "pending";

/// `rooms.status`
pub const ROOM_STATUSES: &[&str] = &["vacant", "occupied", "maintenance"];

/// `mail_outbox.status`
pub mod outbox {
    pub const PENDING: &str = "pending";
    pub const SENT: &str = "sent";
    pub const FAILED: &str = "failed";
}
