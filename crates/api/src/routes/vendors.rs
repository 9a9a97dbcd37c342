//! Route definitions for vendors and their contracts.

use axum::routing::get;
use axum::Router;

use crate::handlers::{contract, vendor};
use crate::state::AppState;

/// Routes mounted at `/vendors`.
///
/// ```text
/// GET, POST          /                -> list, create
/// GET                /search          -> search
/// GET, PUT, DELETE   /{id}            -> get_by_id, update, delete
/// GET                /{id}/contracts  -> list_contracts (admin)
/// ```
pub fn vendor_router() -> Router<AppState> {
    Router::new()
        .route("/", get(vendor::list).post(vendor::create))
        .route("/search", get(vendor::search))
        .route(
            "/{id}",
            get(vendor::get_by_id)
                .put(vendor::update)
                .delete(vendor::delete),
        )
        .route("/{id}/contracts", get(vendor::list_contracts))
}

/// Routes mounted at `/contracts` (admin only).
pub fn contract_router() -> Router<AppState> {
    Router::new()
        .route("/", get(contract::list).post(contract::create))
        .route("/search", get(contract::search))
        .route(
            "/{id}",
            get(contract::get_by_id)
                .put(contract::update)
                .delete(contract::delete),
        )
}
