pub mod asset;
pub mod asset_category;
pub mod auth;
pub mod complaint;
pub mod contract;
pub mod emergency;
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
