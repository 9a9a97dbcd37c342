//! Route definitions for asset categories and assets.

use axum::routing::get;
use axum::Router;

use crate::handlers::{asset, asset_category};
use crate::state::AppState;

/// Routes mounted at `/asset-categories`.
///
/// ```text
/// GET, POST          /             -> list, create
/// GET                /search       -> search
/// GET, PUT, DELETE   /{id}         -> get_by_id, update, delete
/// GET                /{id}/assets  -> list_assets
/// ```
pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/", get(asset_category::list).post(asset_category::create))
        .route("/search", get(asset_category::search))
        .route(
            "/{id}",
            get(asset_category::get_by_id)
                .put(asset_category::update)
                .delete(asset_category::delete),
        )
        .route("/{id}/assets", get(asset_category::list_assets))
}

/// Routes mounted at `/assets`.
///
/// ```text
/// GET, POST          /                          -> list, create
/// GET                /search                    -> search
/// GET, PUT, DELETE   /{id}                      -> get_by_id, update, delete
/// GET                /{id}/maintenance-history  -> maintenance_history
/// ```
pub fn asset_router() -> Router<AppState> {
    Router::new()
        .route("/", get(asset::list).post(asset::create))
        .route("/search", get(asset::search))
        .route(
            "/{id}",
            get(asset::get_by_id).put(asset::update).delete(asset::delete),
        )
        .route("/{id}/maintenance-history", get(asset::maintenance_history))
}
