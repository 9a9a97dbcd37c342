//! Route definitions for the `/complaints` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::complaint;
use crate::state::AppState;

/// Routes mounted at `/complaints`.
///
/// ```text
/// GET, POST          /        -> list (admin), create
/// GET                /search  -> search (admin)
/// GET                /mine    -> mine
/// GET, PUT, DELETE   /{id}    -> get_by_id (owner or admin), update, delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(complaint::list).post(complaint::create))
        .route("/search", get(complaint::search))
        .route("/mine", get(complaint::mine))
        .route(
            "/{id}",
            get(complaint::get_by_id)
                .put(complaint::update)
                .delete(complaint::delete),
        )
}
