//! Route definitions for the front desk: guest receptions and visitors.
//!
//! All endpoints are admin-only.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{reception, visitor};
use crate::state::AppState;

/// Routes mounted at `/receptions`.
///
/// ```text
/// GET, POST          /                -> list, create
/// GET                /search          -> search
/// GET, PUT, DELETE   /{id}            -> get_by_id, update, delete
/// POST               /{id}/check-out  -> check_out
/// ```
pub fn reception_router() -> Router<AppState> {
    Router::new()
        .route("/", get(reception::list).post(reception::create))
        .route("/search", get(reception::search))
        .route(
            "/{id}",
            get(reception::get_by_id)
                .put(reception::update)
                .delete(reception::delete),
        )
        .route("/{id}/check-out", post(reception::check_out))
}

/// Routes mounted at `/visitors`.
pub fn visitor_router() -> Router<AppState> {
    Router::new()
        .route("/", get(visitor::list).post(visitor::create))
        .route("/search", get(visitor::search))
        .route(
            "/{id}",
            get(visitor::get_by_id)
                .put(visitor::update)
                .delete(visitor::delete),
        )
}
