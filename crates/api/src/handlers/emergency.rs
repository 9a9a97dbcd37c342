//! Handlers for the `/emergency-maintenance` resource.
//!
//! Any signed-in user may report an emergency; triage (update, delete) is
//! reserved for admins.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use residence_core::status::{EMERGENCY_PRIORITIES, EMERGENCY_STATUSES};
use residence_core::types::DbId;
use residence_core::validation::{one_of, validate};
use residence_db::models::emergency::{
    CreateEmergencyReport, EmergencyReport, UpdateEmergencyReport,
};
use residence_db::repositories::EmergencyRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, MessageResponse, PageResponse};
use crate::state::AppState;

/// Priority given to reports filed without one.
const DEFAULT_PRIORITY: &str = "medium";

/// POST /api/v1/emergency-maintenance
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateEmergencyReport>,
) -> AppResult<(StatusCode, Json<EmergencyReport>)> {
    validate(&input)?;
    let priority = input.priority.as_deref().unwrap_or(DEFAULT_PRIORITY);
    one_of("priority", priority, EMERGENCY_PRIORITIES)?;

    let report = EmergencyRepo::create(&state.pool, &input, priority, auth.user_id).await?;
    tracing::warn!(
        report_id = report.id,
        priority = %report.priority,
        location = %report.location,
        "Emergency reported",
    );
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /api/v1/emergency-maintenance
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<PageResponse<EmergencyReport>>> {
    let (page, limit, filter) = params.resolve();
    let data = EmergencyRepo::list(&state.pool, &filter).await?;
    let total = EmergencyRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse {
        data,
        page,
        limit,
        total,
    }))
}

/// GET /api/v1/emergency-maintenance/search
pub async fn search(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<EmergencyReport>>>> {
    let data = EmergencyRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/emergency-maintenance/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<EmergencyReport>> {
    let report = EmergencyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("EmergencyReport", id))?;
    Ok(Json(report))
}

/// PUT /api/v1/emergency-maintenance/{id}
///
/// Moving to `resolved` stamps `resolved_at`; any other status clears it.
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateEmergencyReport>,
) -> AppResult<Json<MessageResponse>> {
    validate(&input)?;
    one_of("priority", &input.priority, EMERGENCY_PRIORITIES)?;
    one_of("status", &input.status, EMERGENCY_STATUSES)?;

    let report = EmergencyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("EmergencyReport", id))?;
    tracing::info!(report_id = report.id, status = %report.status, "Emergency report updated");
    Ok(Json(MessageResponse::updated("Emergency report")))
}

/// DELETE /api/v1/emergency-maintenance/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !EmergencyRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("EmergencyReport", id));
    }
    Ok(Json(MessageResponse::deleted("Emergency report")))
}
