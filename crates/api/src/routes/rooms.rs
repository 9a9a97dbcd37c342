//! Route definitions for the `/rooms` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::room;
use crate::state::AppState;

/// Routes mounted at `/rooms`.
///
/// ```text
/// GET, POST          /                          -> list, create
/// GET                /search                    -> search
/// GET, PUT, DELETE   /{id}                      -> get_by_id, update, delete
/// GET, POST          /{id}/residents            -> list_residents, add_resident
/// DELETE             /{id}/residents/{user_id}  -> remove_resident
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(room::list).post(room::create))
        .route("/search", get(room::search))
        .route(
            "/{id}",
            get(room::get_by_id).put(room::update).delete(room::delete),
        )
        .route(
            "/{id}/residents",
            get(room::list_residents).post(room::add_resident),
        )
        .route("/{id}/residents/{user_id}", delete(room::remove_resident))
}
