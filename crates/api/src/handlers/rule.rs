//! Handlers for the `/residence-rules` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use residence_core::types::DbId;
use residence_core::validation::validate;
use residence_db::models::rule::{CreateResidenceRule, ResidenceRule, UpdateResidenceRule};
use residence_db::repositories::ResidenceRuleRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, MessageResponse, PageResponse};
use crate::state::AppState;

/// POST /api/v1/residence-rules
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateResidenceRule>,
) -> AppResult<(StatusCode, Json<ResidenceRule>)> {
    validate(&input)?;
    let rule = ResidenceRuleRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(rule)))
}

/// GET /api/v1/residence-rules
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<PageResponse<ResidenceRule>>> {
    let (page, limit, filter) = params.resolve();
    let data = ResidenceRuleRepo::list(&state.pool, &filter).await?;
    let total = ResidenceRuleRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse {
        data,
        page,
        limit,
        total,
    }))
}

/// GET /api/v1/residence-rules/search
pub async fn search(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<ResidenceRule>>>> {
    let data = ResidenceRuleRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/residence-rules/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ResidenceRule>> {
    let rule = ResidenceRuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("ResidenceRule", id))?;
    Ok(Json(rule))
}

/// PUT /api/v1/residence-rules/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateResidenceRule>,
) -> AppResult<Json<MessageResponse>> {
    validate(&input)?;
    ResidenceRuleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("ResidenceRule", id))?;
    Ok(Json(MessageResponse::updated("Residence rule")))
}

/// DELETE /api/v1/residence-rules/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !ResidenceRuleRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("ResidenceRule", id));
    }
    Ok(Json(MessageResponse::deleted("Residence rule")))
}
