//! Handlers for the `/assets` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use residence_core::status::ASSET_STATUSES;
use residence_core::types::DbId;
use residence_core::validation::{non_negative, one_of, validate};
use residence_db::models::asset::{Asset, CreateAsset, UpdateAsset};
use residence_db::models::maintenance_history::MaintenanceRecord;
use residence_db::repositories::{AssetCategoryRepo, AssetRepo, MaintenanceHistoryRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, MessageResponse, PageResponse};
use crate::state::AppState;

/// Shape, vocabulary and reference checks shared by create and update.
async fn check_input(state: &AppState, input: &CreateAsset) -> AppResult<()> {
    validate(input)?;
    one_of("status", &input.status, ASSET_STATUSES)?;
    non_negative("value", input.value)?;
    if !AssetCategoryRepo::exists(&state.pool, input.category_id).await? {
        return Err(AppError::missing_reference("AssetCategory", input.category_id));
    }
    Ok(())
}

/// POST /api/v1/assets
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateAsset>,
) -> AppResult<(StatusCode, Json<Asset>)> {
    check_input(&state, &input).await?;
    let asset = AssetRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// GET /api/v1/assets
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<PageResponse<Asset>>> {
    let (page, limit, filter) = params.resolve();
    let data = AssetRepo::list(&state.pool, &filter).await?;
    let total = AssetRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse {
        data,
        page,
        limit,
        total,
    }))
}

/// GET /api/v1/assets/search
pub async fn search(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Asset>>>> {
    let data = AssetRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/assets/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Asset>> {
    let asset = AssetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Asset", id))?;
    Ok(Json(asset))
}

/// GET /api/v1/assets/{id}/maintenance-history
pub async fn maintenance_history(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<MaintenanceRecord>>>> {
    if !AssetRepo::exists(&state.pool, id).await? {
        return Err(AppError::not_found("Asset", id));
    }
    let data = MaintenanceHistoryRepo::list_by_asset(&state.pool, id).await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/assets/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateAsset>,
) -> AppResult<Json<MessageResponse>> {
    check_input(&state, &input).await?;
    AssetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Asset", id))?;
    Ok(Json(MessageResponse::updated("Asset")))
}

/// DELETE /api/v1/assets/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !AssetRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Asset", id));
    }
    Ok(Json(MessageResponse::deleted("Asset")))
}
