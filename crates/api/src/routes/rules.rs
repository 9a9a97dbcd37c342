use axum::routing::get;
use axum::Router;

use crate::handlers::rule;
use crate::state::AppState;

/// Routes mounted at `/residence-rules`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rule::list).post(rule::create))
        .route("/search", get(rule::search))
        .route(
            "/{id}",
            get(rule::get_by_id).put(rule::update).delete(rule::delete),
        )
}
