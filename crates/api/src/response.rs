//! Shared response envelope types for API handlers.
//!
//! - `{ "data": [...] }` for search results ([`DataResponse`])
//! - `{ "data", "page", "limit", "total" }` for paginated lists ([`PageResponse`])
//! - `{ "message": ... }` for update and delete ([`MessageResponse`])

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One page of a list endpoint.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub page: i64,
    pub limit: i64,
    /// Rows matching the filter across all pages.
    pub total: i64,
}

/// Acknowledgement for mutations that do not echo the row.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// `"<entity> updated successfully"`
    pub fn updated(entity: &str) -> Self {
        Self::new(format!("{entity} updated successfully"))
    }

    /// `"<entity> deleted successfully"`
    pub fn deleted(entity: &str) -> Self {
        Self::new(format!("{entity} deleted successfully"))
    }
}
