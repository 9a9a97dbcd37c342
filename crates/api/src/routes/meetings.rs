//! Route definitions for the `/meetings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::meeting;
use crate::state::AppState;

/// Routes mounted at `/meetings`.
///
/// ```text
/// GET, POST          /                    -> list, create
/// GET                /search              -> search
/// GET, PUT, DELETE   /{id}                -> get_by_id, update, delete
/// POST, DELETE       /{id}/register       -> register, unregister (caller)
/// GET                /{id}/registrations  -> registrations (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(meeting::list).post(meeting::create))
        .route("/search", get(meeting::search))
        .route(
            "/{id}",
            get(meeting::get_by_id)
                .put(meeting::update)
                .delete(meeting::delete),
        )
        .route(
            "/{id}/register",
            post(meeting::register).delete(meeting::unregister),
        )
        .route("/{id}/registrations", get(meeting::registrations))
}
