//! Handlers for the `/vendors` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use residence_core::types::DbId;
use residence_core::validation::validate;
use residence_db::models::contract::Contract;
use residence_db::models::vendor::{CreateVendor, UpdateVendor, Vendor};
use residence_db::repositories::{ContractRepo, VendorRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, MessageResponse, PageResponse};
use crate::state::AppState;

/// POST /api/v1/vendors
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateVendor>,
) -> AppResult<(StatusCode, Json<Vendor>)> {
    validate(&input)?;
    let vendor = VendorRepo::create(&state.pool, &input).await?;
    tracing::info!(vendor_id = vendor.id, "Vendor created");
    Ok((StatusCode::CREATED, Json(vendor)))
}

/// GET /api/v1/vendors
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<PageResponse<Vendor>>> {
    let (page, limit, filter) = params.resolve();
    let data = VendorRepo::list(&state.pool, &filter).await?;
    let total = VendorRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse {
        data,
        page,
        limit,
        total,
    }))
}

/// GET /api/v1/vendors/search
pub async fn search(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Vendor>>>> {
    let data = VendorRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/vendors/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Vendor>> {
    let vendor = VendorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Vendor", id))?;
    Ok(Json(vendor))
}

/// GET /api/v1/vendors/{id}/contracts (admin)
pub async fn list_contracts(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<Contract>>>> {
    if !VendorRepo::exists(&state.pool, id).await? {
        return Err(AppError::not_found("Vendor", id));
    }
    let data = ContractRepo::list_by_vendor(&state.pool, id).await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/vendors/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateVendor>,
) -> AppResult<Json<MessageResponse>> {
    validate(&input)?;
    VendorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Vendor", id))?;
    Ok(Json(MessageResponse::updated("Vendor")))
}

/// DELETE /api/v1/vendors/{id}
///
/// Fails with 400 while contracts still reference the vendor.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !VendorRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Vendor", id));
    }
    Ok(Json(MessageResponse::deleted("Vendor")))
}
