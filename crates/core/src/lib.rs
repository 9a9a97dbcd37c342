//! Shared domain vocabulary for the residence management backend.
//!
//! Zero internal dependencies so that the repository layer, the HTTP layer
//! and the mail dispatcher can all share these definitions.

pub mod error;
pub mod roles;
pub mod search;
pub mod status;
pub mod types;
pub mod validation;
