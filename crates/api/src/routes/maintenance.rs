//! Route definitions for planned, historical and emergency maintenance.

use axum::routing::get;
use axum::Router;

use crate::handlers::{emergency, maintenance_history, maintenance_plan};
use crate::state::AppState;

/// Routes mounted at `/maintenance-plans`.
pub fn plan_router() -> Router<AppState> {
    Router::new()
        .route("/", get(maintenance_plan::list).post(maintenance_plan::create))
        .route("/search", get(maintenance_plan::search))
        .route(
            "/{id}",
            get(maintenance_plan::get_by_id)
                .put(maintenance_plan::update)
                .delete(maintenance_plan::delete),
        )
}

/// Routes mounted at `/maintenance-history`.
pub fn history_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(maintenance_history::list).post(maintenance_history::create),
        )
        .route("/search", get(maintenance_history::search))
        .route(
            "/{id}",
            get(maintenance_history::get_by_id)
                .put(maintenance_history::update)
                .delete(maintenance_history::delete),
        )
}

/// Routes mounted at `/emergency-maintenance`.
///
/// ```text
/// GET, POST          /        -> list, create (any signed-in user)
/// GET                /search  -> search
/// GET, PUT, DELETE   /{id}    -> get_by_id, update (admin), delete (admin)
/// ```
pub fn emergency_router() -> Router<AppState> {
    Router::new()
        .route("/", get(emergency::list).post(emergency::create))
        .route("/search", get(emergency::search))
        .route(
            "/{id}",
            get(emergency::get_by_id)
                .put(emergency::update)
                .delete(emergency::delete),
        )
}
