//! Handlers for the `/receptions` guest log. Every route is admin-only.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use residence_core::error::CoreError;
use residence_core::types::DbId;
use residence_core::validation::validate;
use residence_db::models::reception::{CreateReception, Reception, UpdateReception};
use residence_db::repositories::{ReceptionRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, MessageResponse, PageResponse};
use crate::state::AppState;

async fn check_input(state: &AppState, input: &CreateReception) -> AppResult<()> {
    validate(input)?;
    if let (Some(check_in), Some(check_out)) = (input.check_in_at, input.check_out_at) {
        if check_out < check_in {
            return Err(AppError::Core(CoreError::Validation(
                "check_out_at must not be earlier than check_in_at".into(),
            )));
        }
    }
    if !UserRepo::exists(&state.pool, input.resident_id).await? {
        return Err(AppError::missing_reference("User", input.resident_id));
    }
    Ok(())
}

/// POST /api/v1/receptions
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateReception>,
) -> AppResult<(StatusCode, Json<Reception>)> {
    check_input(&state, &input).await?;
    let reception = ReceptionRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(reception)))
}

/// GET /api/v1/receptions
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<PageResponse<Reception>>> {
    let (page, limit, filter) = params.resolve();
    let data = ReceptionRepo::list(&state.pool, &filter).await?;
    let total = ReceptionRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse {
        data,
        page,
        limit,
        total,
    }))
}

/// GET /api/v1/receptions/search
pub async fn search(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Reception>>>> {
    let data = ReceptionRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/receptions/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Reception>> {
    let reception = ReceptionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Reception", id))?;
    Ok(Json(reception))
}

/// PUT /api/v1/receptions/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateReception>,
) -> AppResult<Json<MessageResponse>> {
    check_input(&state, &input).await?;
    ReceptionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Reception", id))?;
    Ok(Json(MessageResponse::updated("Reception")))
}

/// POST /api/v1/receptions/{id}/check-out
///
/// A guest can only be checked out once; a second attempt is a 409.
pub async fn check_out(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Reception>> {
    if let Some(reception) = ReceptionRepo::check_out(&state.pool, id).await? {
        return Ok(Json(reception));
    }
    match ReceptionRepo::find_by_id(&state.pool, id).await? {
        Some(_) => Err(AppError::Core(CoreError::Conflict(format!(
            "Reception {id} is already checked out"
        )))),
        None => Err(AppError::not_found("Reception", id)),
    }
}

/// DELETE /api/v1/receptions/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !ReceptionRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Reception", id));
    }
    Ok(Json(MessageResponse::deleted("Reception")))
}
