//! Handlers for the `/maintenance-plans` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use residence_core::status::{MAINTENANCE_FREQUENCIES, MAINTENANCE_PLAN_STATUSES};
use residence_core::types::DbId;
use residence_core::validation::{one_of, validate};
use residence_db::models::maintenance_plan::{
    CreateMaintenancePlan, MaintenancePlan, UpdateMaintenancePlan,
};
use residence_db::repositories::{AssetRepo, MaintenancePlanRepo, VendorRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, MessageResponse, PageResponse};
use crate::state::AppState;

async fn check_input(state: &AppState, input: &CreateMaintenancePlan) -> AppResult<()> {
    validate(input)?;
    one_of("frequency", &input.frequency, MAINTENANCE_FREQUENCIES)?;
    one_of("status", &input.status, MAINTENANCE_PLAN_STATUSES)?;
    if !AssetRepo::exists(&state.pool, input.asset_id).await? {
        return Err(AppError::missing_reference("Asset", input.asset_id));
    }
    if let Some(vendor_id) = input.vendor_id {
        if !VendorRepo::exists(&state.pool, vendor_id).await? {
            return Err(AppError::missing_reference("Vendor", vendor_id));
        }
    }
    Ok(())
}

/// POST /api/v1/maintenance-plans
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateMaintenancePlan>,
) -> AppResult<(StatusCode, Json<MaintenancePlan>)> {
    check_input(&state, &input).await?;
    let plan = MaintenancePlanRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /api/v1/maintenance-plans
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<PageResponse<MaintenancePlan>>> {
    let (page, limit, filter) = params.resolve();
    let data = MaintenancePlanRepo::list(&state.pool, &filter).await?;
    let total = MaintenancePlanRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse {
        data,
        page,
        limit,
        total,
    }))
}

/// GET /api/v1/maintenance-plans/search
pub async fn search(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<MaintenancePlan>>>> {
    let data = MaintenancePlanRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/maintenance-plans/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MaintenancePlan>> {
    let plan = MaintenancePlanRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("MaintenancePlan", id))?;
    Ok(Json(plan))
}

/// PUT /api/v1/maintenance-plans/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateMaintenancePlan>,
) -> AppResult<Json<MessageResponse>> {
    check_input(&state, &input).await?;
    MaintenancePlanRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("MaintenancePlan", id))?;
    Ok(Json(MessageResponse::updated("Maintenance plan")))
}

/// DELETE /api/v1/maintenance-plans/{id}
///
/// History records that referenced the plan keep their row with `plan_id`
/// cleared.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !MaintenancePlanRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("MaintenancePlan", id));
    }
    Ok(Json(MessageResponse::deleted("Maintenance plan")))
}
