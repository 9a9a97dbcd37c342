//! Handlers for the `/visitors` register. Every route is admin-only.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use residence_core::types::DbId;
use residence_core::validation::validate;
use residence_db::models::visitor::{CreateVisitor, UpdateVisitor, Visitor};
use residence_db::repositories::{RoomRepo, VisitorRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, MessageResponse, PageResponse};
use crate::state::AppState;

async fn check_input(state: &AppState, input: &CreateVisitor) -> AppResult<()> {
    validate(input)?;
    if let Some(room_id) = input.room_id {
        if !RoomRepo::exists(&state.pool, room_id).await? {
            return Err(AppError::missing_reference("Room", room_id));
        }
    }
    Ok(())
}

/// POST /api/v1/visitors
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateVisitor>,
) -> AppResult<(StatusCode, Json<Visitor>)> {
    check_input(&state, &input).await?;
    let visitor = VisitorRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(visitor)))
}

/// GET /api/v1/visitors
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<PageResponse<Visitor>>> {
    let (page, limit, filter) = params.resolve();
    let data = VisitorRepo::list(&state.pool, &filter).await?;
    let total = VisitorRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse {
        data,
        page,
        limit,
        total,
    }))
}

/// GET /api/v1/visitors/search
pub async fn search(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Visitor>>>> {
    let data = VisitorRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/visitors/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Visitor>> {
    let visitor = VisitorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Visitor", id))?;
    Ok(Json(visitor))
}

/// PUT /api/v1/visitors/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateVisitor>,
) -> AppResult<Json<MessageResponse>> {
    check_input(&state, &input).await?;
    VisitorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Visitor", id))?;
    Ok(Json(MessageResponse::updated("Visitor")))
}

/// DELETE /api/v1/visitors/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !VisitorRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Visitor", id));
    }
    Ok(Json(MessageResponse::deleted("Visitor")))
}
