//! Handlers for the `/complaints` resource.
//!
//! Residents file complaints and read their own; admins triage them.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use residence_core::status::COMPLAINT_STATUSES;
use residence_core::types::DbId;
use residence_core::validation::{one_of, validate};
use residence_db::models::complaint::{Complaint, CreateComplaint, UpdateComplaint};
use residence_db::repositories::ComplaintRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, MessageResponse, PageResponse};
use crate::state::AppState;

/// POST /api/v1/complaints
///
/// The complaint is owned by the caller and starts as `pending`.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateComplaint>,
) -> AppResult<(StatusCode, Json<Complaint>)> {
    validate(&input)?;
    let complaint = ComplaintRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(complaint_id = complaint.id, user_id = auth.user_id, "Complaint filed");
    Ok((StatusCode::CREATED, Json(complaint)))
}

/// GET /api/v1/complaints
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<PageResponse<Complaint>>> {
    let (page, limit, filter) = params.resolve();
    let data = ComplaintRepo::list(&state.pool, &filter).await?;
    let total = ComplaintRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse {
        data,
        page,
        limit,
        total,
    }))
}

/// GET /api/v1/complaints/search
pub async fn search(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Complaint>>>> {
    let data = ComplaintRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/complaints/mine
pub async fn mine(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Complaint>>>> {
    let data = ComplaintRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/complaints/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Complaint>> {
    let complaint = ComplaintRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Complaint", id))?;
    auth.ensure_owner_or_admin(complaint.user_id)?;
    Ok(Json(complaint))
}

/// PUT /api/v1/complaints/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateComplaint>,
) -> AppResult<Json<MessageResponse>> {
    validate(&input)?;
    one_of("status", &input.status, COMPLAINT_STATUSES)?;
    ComplaintRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Complaint", id))?;
    Ok(Json(MessageResponse::updated("Complaint")))
}

/// DELETE /api/v1/complaints/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !ComplaintRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Complaint", id));
    }
    Ok(Json(MessageResponse::deleted("Complaint")))
}
