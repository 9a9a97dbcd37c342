//! Handlers for the `/meetings` resource and meeting registrations.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use residence_core::error::CoreError;
use residence_core::types::DbId;
use residence_core::validation::validate;
use residence_db::models::meeting::{CreateMeeting, Meeting, MeetingRegistration, UpdateMeeting};
use residence_db::repositories::{MeetingRepo, RegistrationOutcome};
use residence_events::templates;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, MessageResponse, PageResponse};
use crate::state::AppState;

/// POST /api/v1/meetings
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateMeeting>,
) -> AppResult<(StatusCode, Json<Meeting>)> {
    validate(&input)?;
    let meeting = MeetingRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(meeting)))
}

/// GET /api/v1/meetings
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<PageResponse<Meeting>>> {
    let (page, limit, filter) = params.resolve();
    let data = MeetingRepo::list(&state.pool, &filter).await?;
    let total = MeetingRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse {
        data,
        page,
        limit,
        total,
    }))
}

/// GET /api/v1/meetings/search
pub async fn search(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Meeting>>>> {
    let data = MeetingRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/meetings/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Meeting>> {
    let meeting = MeetingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Meeting", id))?;
    Ok(Json(meeting))
}

/// PUT /api/v1/meetings/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateMeeting>,
) -> AppResult<Json<MessageResponse>> {
    validate(&input)?;
    MeetingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Meeting", id))?;
    Ok(Json(MessageResponse::updated("Meeting")))
}

/// DELETE /api/v1/meetings/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !MeetingRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Meeting", id));
    }
    Ok(Json(MessageResponse::deleted("Meeting")))
}

// ---------------------------------------------------------------------------
// Registrations
// ---------------------------------------------------------------------------

/// POST /api/v1/meetings/{id}/register
///
/// Registers the caller and queues a confirmation email in the same
/// transaction.
pub async fn register(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<(StatusCode, Json<MeetingRegistration>)> {
    let outcome =
        MeetingRepo::register(&state.pool, id, auth.user_id, templates::meeting_confirmation)
            .await?;
    match outcome {
        RegistrationOutcome::Registered(registration) => {
            tracing::info!(meeting_id = id, user_id = auth.user_id, "Meeting registration");
            Ok((StatusCode::CREATED, Json(registration)))
        }
        RegistrationOutcome::MeetingNotFound => Err(AppError::not_found("Meeting", id)),
        RegistrationOutcome::AlreadyRegistered => Err(AppError::Core(CoreError::Conflict(
            format!("Already registered for meeting {id}"),
        ))),
        RegistrationOutcome::Full => Err(AppError::Core(CoreError::Conflict(format!(
            "Meeting {id} has reached its capacity"
        )))),
    }
}

/// DELETE /api/v1/meetings/{id}/register
pub async fn unregister(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !MeetingRepo::unregister(&state.pool, id, auth.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "MeetingRegistration",
            id,
        }));
    }
    Ok(Json(MessageResponse::new("Registration cancelled")))
}

/// GET /api/v1/meetings/{id}/registrations
pub async fn registrations(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<MeetingRegistration>>>> {
    if MeetingRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::not_found("Meeting", id));
    }
    let data = MeetingRepo::list_registrations(&state.pool, id).await?;
    Ok(Json(DataResponse { data }))
}
