//! Handlers for the `/contracts` resource. Every route is admin-only.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use residence_core::status::CONTRACT_STATUSES;
use residence_core::types::DbId;
use residence_core::validation::{date_order, non_negative, one_of, validate};
use residence_db::models::contract::{Contract, CreateContract, UpdateContract};
use residence_db::repositories::{ContractRepo, VendorRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, MessageResponse, PageResponse};
use crate::state::AppState;

async fn check_input(state: &AppState, input: &CreateContract) -> AppResult<()> {
    validate(input)?;
    one_of("status", &input.status, CONTRACT_STATUSES)?;
    date_order(input.start_date, input.end_date)?;
    non_negative("value", input.value)?;
    if !VendorRepo::exists(&state.pool, input.vendor_id).await? {
        return Err(AppError::missing_reference("Vendor", input.vendor_id));
    }
    Ok(())
}

/// POST /api/v1/contracts
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateContract>,
) -> AppResult<(StatusCode, Json<Contract>)> {
    check_input(&state, &input).await?;
    let contract = ContractRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(contract)))
}

/// GET /api/v1/contracts
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<PageResponse<Contract>>> {
    let (page, limit, filter) = params.resolve();
    let data = ContractRepo::list(&state.pool, &filter).await?;
    let total = ContractRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse {
        data,
        page,
        limit,
        total,
    }))
}

/// GET /api/v1/contracts/search
pub async fn search(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Contract>>>> {
    let data = ContractRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/contracts/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Contract>> {
    let contract = ContractRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Contract", id))?;
    Ok(Json(contract))
}

/// PUT /api/v1/contracts/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateContract>,
) -> AppResult<Json<MessageResponse>> {
    check_input(&state, &input).await?;
    ContractRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Contract", id))?;
    Ok(Json(MessageResponse::updated("Contract")))
}

/// DELETE /api/v1/contracts/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !ContractRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Contract", id));
    }
    Ok(Json(MessageResponse::deleted("Contract")))
}
