//! Handlers for the `/rooms` resource and its resident assignments.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use residence_core::error::CoreError;
use residence_core::status::ROOM_STATUSES;
use residence_core::types::DbId;
use residence_core::validation::{non_negative, one_of, validate};
use residence_db::models::room::{AddRoomResident, CreateRoom, Room, RoomResident, UpdateRoom};
use residence_db::repositories::{AssignOutcome, RoomRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, MessageResponse, PageResponse};
use crate::state::AppState;

fn check_input(input: &CreateRoom) -> AppResult<()> {
    validate(input)?;
    one_of("status", &input.status, ROOM_STATUSES)?;
    non_negative("area", input.area)?;
    Ok(())
}

/// POST /api/v1/rooms
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateRoom>,
) -> AppResult<(StatusCode, Json<Room>)> {
    check_input(&input)?;
    let room = RoomRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// GET /api/v1/rooms
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<PageResponse<Room>>> {
    let (page, limit, filter) = params.resolve();
    let data = RoomRepo::list(&state.pool, &filter).await?;
    let total = RoomRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse {
        data,
        page,
        limit,
        total,
    }))
}

/// GET /api/v1/rooms/search
pub async fn search(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Room>>>> {
    let data = RoomRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/rooms/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Room>> {
    let room = RoomRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Room", id))?;
    Ok(Json(room))
}

/// PUT /api/v1/rooms/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateRoom>,
) -> AppResult<Json<MessageResponse>> {
    check_input(&input)?;
    RoomRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Room", id))?;
    Ok(Json(MessageResponse::updated("Room")))
}

/// DELETE /api/v1/rooms/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !RoomRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Room", id));
    }
    Ok(Json(MessageResponse::deleted("Room")))
}

// ---------------------------------------------------------------------------
// Residents
// ---------------------------------------------------------------------------

/// GET /api/v1/rooms/{id}/residents
pub async fn list_residents(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<RoomResident>>>> {
    if !RoomRepo::exists(&state.pool, id).await? {
        return Err(AppError::not_found("Room", id));
    }
    let data = RoomRepo::list_residents(&state.pool, id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/rooms/{id}/residents
pub async fn add_resident(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<AddRoomResident>,
) -> AppResult<(StatusCode, Json<RoomResident>)> {
    match RoomRepo::add_resident(&state.pool, id, input.user_id).await? {
        AssignOutcome::Assigned(resident) => {
            tracing::info!(room_id = id, user_id = input.user_id, "Resident assigned to room");
            Ok((StatusCode::CREATED, Json(resident)))
        }
        AssignOutcome::RoomNotFound => Err(AppError::not_found("Room", id)),
        AssignOutcome::UserNotFound => Err(AppError::missing_reference("User", input.user_id)),
        AssignOutcome::AlreadyAssigned => Err(AppError::Core(CoreError::Conflict(format!(
            "User {} is already assigned to room {id}",
            input.user_id
        )))),
    }
}

/// DELETE /api/v1/rooms/{id}/residents/{user_id}
pub async fn remove_resident(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath((id, user_id)): AppPath<(DbId, DbId)>,
) -> AppResult<Json<MessageResponse>> {
    if !RoomRepo::remove_resident(&state.pool, id, user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "RoomResident",
            id: user_id,
        }));
    }
    Ok(Json(MessageResponse::new("Resident removed from room")))
}
