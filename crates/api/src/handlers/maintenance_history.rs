//! Handlers for the `/maintenance-history` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use residence_core::types::DbId;
use residence_core::validation::{non_negative, validate};
use residence_db::models::maintenance_history::{
    CreateMaintenanceRecord, MaintenanceRecord, UpdateMaintenanceRecord,
};
use residence_db::repositories::{AssetRepo, MaintenanceHistoryRepo, MaintenancePlanRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, MessageResponse, PageResponse};
use crate::state::AppState;

async fn check_input(state: &AppState, input: &CreateMaintenanceRecord) -> AppResult<()> {
    validate(input)?;
    non_negative("cost", input.cost)?;
    if !AssetRepo::exists(&state.pool, input.asset_id).await? {
        return Err(AppError::missing_reference("Asset", input.asset_id));
    }
    if let Some(plan_id) = input.plan_id {
        if !MaintenancePlanRepo::exists(&state.pool, plan_id).await? {
            return Err(AppError::missing_reference("MaintenancePlan", plan_id));
        }
    }
    Ok(())
}

/// POST /api/v1/maintenance-history
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateMaintenanceRecord>,
) -> AppResult<(StatusCode, Json<MaintenanceRecord>)> {
    check_input(&state, &input).await?;
    let record = MaintenanceHistoryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/maintenance-history
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<PageResponse<MaintenanceRecord>>> {
    let (page, limit, filter) = params.resolve();
    let data = MaintenanceHistoryRepo::list(&state.pool, &filter).await?;
    let total = MaintenanceHistoryRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse {
        data,
        page,
        limit,
        total,
    }))
}

/// GET /api/v1/maintenance-history/search
pub async fn search(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<MaintenanceRecord>>>> {
    let data = MaintenanceHistoryRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/maintenance-history/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MaintenanceRecord>> {
    let record = MaintenanceHistoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("MaintenanceRecord", id))?;
    Ok(Json(record))
}

/// PUT /api/v1/maintenance-history/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateMaintenanceRecord>,
) -> AppResult<Json<MessageResponse>> {
    check_input(&state, &input).await?;
    MaintenanceHistoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("MaintenanceRecord", id))?;
    Ok(Json(MessageResponse::updated("Maintenance record")))
}

/// DELETE /api/v1/maintenance-history/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !MaintenanceHistoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("MaintenanceRecord", id));
    }
    Ok(Json(MessageResponse::deleted("Maintenance record")))
}
