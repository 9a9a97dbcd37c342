//! Route definitions for the `/notifications` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET, POST          /        -> list, create (admin; queues emails)
/// GET                /search  -> search
/// GET                /mine    -> mine
/// GET, PUT, DELETE   /{id}    -> get_by_id, update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notification::list).post(notification::create))
        .route("/search", get(notification::search))
        .route("/mine", get(notification::mine))
        .route(
            "/{id}",
            get(notification::get_by_id)
                .put(notification::update)
                .delete(notification::delete),
        )
}
