//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. List methods take a
//! [`ListFilter`](crate::filter::ListFilter) and order by ascending id.

pub mod asset_category_repo;
pub mod asset_repo;
pub mod complaint_repo;
pub mod contract_repo;
pub mod emergency_repo;
pub mod mail_outbox_repo;
pub mod maintenance_history_repo;
pub mod maintenance_plan_repo;
pub mod meeting_repo;
pub mod notification_repo;
pub mod reception_repo;
pub mod resident_profile_repo;
pub mod room_repo;
pub mod rule_repo;
pub mod user_repo;
pub mod vendor_repo;
pub mod visitor_repo;

pub use asset_category_repo::AssetCategoryRepo;
pub use asset_repo::AssetRepo;
pub use complaint_repo::ComplaintRepo;
pub use contract_repo::ContractRepo;
pub use emergency_repo::EmergencyRepo;
pub use mail_outbox_repo::MailOutboxRepo;
pub use maintenance_history_repo::MaintenanceHistoryRepo;
pub use maintenance_plan_repo::MaintenancePlanRepo;
pub use meeting_repo::{MeetingRepo, RegistrationOutcome};
pub use notification_repo::NotificationRepo;
pub use reception_repo::ReceptionRepo;
pub use resident_profile_repo::ResidentProfileRepo;
pub use room_repo::{AssignOutcome, RoomRepo};
pub use rule_repo::ResidenceRuleRepo;
pub use user_repo::UserRepo;
pub use vendor_repo::VendorRepo;
pub use visitor_repo::VisitorRepo;
