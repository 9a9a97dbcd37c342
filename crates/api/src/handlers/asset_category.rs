//! Handlers for the `/asset-categories` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use residence_core::types::DbId;
use residence_core::validation::validate;
use residence_db::models::asset::Asset;
use residence_db::models::asset_category::{
    AssetCategory, CreateAssetCategory, UpdateAssetCategory,
};
use residence_db::repositories::{AssetCategoryRepo, AssetRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, MessageResponse, PageResponse};
use crate::state::AppState;

/// POST /api/v1/asset-categories
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateAssetCategory>,
) -> AppResult<(StatusCode, Json<AssetCategory>)> {
    validate(&input)?;
    let category = AssetCategoryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/asset-categories
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<PageResponse<AssetCategory>>> {
    let (page, limit, filter) = params.resolve();
    let data = AssetCategoryRepo::list(&state.pool, &filter).await?;
    let total = AssetCategoryRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse {
        data,
        page,
        limit,
        total,
    }))
}

/// GET /api/v1/asset-categories/search
pub async fn search(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<AssetCategory>>>> {
    let data = AssetCategoryRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/asset-categories/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<AssetCategory>> {
    let category = AssetCategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("AssetCategory", id))?;
    Ok(Json(category))
}

/// GET /api/v1/asset-categories/{id}/assets
pub async fn list_assets(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<Asset>>>> {
    if !AssetCategoryRepo::exists(&state.pool, id).await? {
        return Err(AppError::not_found("AssetCategory", id));
    }
    let data = AssetRepo::list_by_category(&state.pool, id).await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/asset-categories/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateAssetCategory>,
) -> AppResult<Json<MessageResponse>> {
    validate(&input)?;
    AssetCategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("AssetCategory", id))?;
    Ok(Json(MessageResponse::updated("Asset category")))
}

/// DELETE /api/v1/asset-categories/{id}
///
/// Fails with 400 while assets still reference the category.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !AssetCategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("AssetCategory", id));
    }
    Ok(Json(MessageResponse::deleted("Asset category")))
}
