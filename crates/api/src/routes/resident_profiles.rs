//! Route definitions for the `/resident-profiles` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::resident_profile;
use crate::state::AppState;

/// Routes mounted at `/resident-profiles`.
///
/// ```text
/// GET, POST          /        -> list (admin), create
/// GET                /search  -> search (admin)
/// GET                /me      -> me
/// GET, PUT, DELETE   /{id}    -> get_by_id, update (owner or admin), delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(resident_profile::list).post(resident_profile::create))
        .route("/search", get(resident_profile::search))
        .route("/me", get(resident_profile::me))
        .route(
            "/{id}",
            get(resident_profile::get_by_id)
                .put(resident_profile::update)
                .delete(resident_profile::delete),
        )
}
