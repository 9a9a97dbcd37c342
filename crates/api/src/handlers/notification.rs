//! Handlers for the `/notifications` resource.
//!
//! Publishing a notification fans out one outbox email per user in the
//! target role; the background dispatcher delivers them.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use residence_core::roles::NOTIFICATION_TARGETS;
use residence_core::types::DbId;
use residence_core::validation::{one_of, validate};
use residence_db::models::notification::{
    CreateNotification, Notification, PublishedNotification, UpdateNotification,
};
use residence_db::repositories::NotificationRepo;
use residence_events::templates;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, MessageResponse, PageResponse};
use crate::state::AppState;

fn check_input(input: &CreateNotification) -> AppResult<()> {
    validate(input)?;
    one_of("target_role", &input.target_role, NOTIFICATION_TARGETS)?;
    Ok(())
}

/// POST /api/v1/notifications
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateNotification>,
) -> AppResult<(StatusCode, Json<PublishedNotification>)> {
    check_input(&input)?;
    let (subject, body) = templates::notification(&input);
    let (notification, queued_emails) =
        NotificationRepo::publish(&state.pool, Some(admin.user_id), &input, &subject, &body)
            .await?;

    tracing::info!(
        notification_id = notification.id,
        target_role = %notification.target_role,
        queued_emails,
        "Notification published",
    );
    Ok((
        StatusCode::CREATED,
        Json(PublishedNotification {
            notification,
            queued_emails,
        }),
    ))
}

/// GET /api/v1/notifications
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<PageResponse<Notification>>> {
    let (page, limit, filter) = params.resolve();
    let data = NotificationRepo::list(&state.pool, &filter).await?;
    let total = NotificationRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse {
        data,
        page,
        limit,
        total,
    }))
}

/// GET /api/v1/notifications/search
pub async fn search(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let data = NotificationRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/notifications/mine
///
/// Notifications addressed to the caller's role or to everyone, newest first.
pub async fn mine(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let data = NotificationRepo::list_for_role(&state.pool, &auth.role).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/notifications/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Notification>> {
    let notification = NotificationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Notification", id))?;
    Ok(Json(notification))
}

/// PUT /api/v1/notifications/{id}
///
/// Edits the stored notification only; emails already queued are not
/// re-sent.
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateNotification>,
) -> AppResult<Json<MessageResponse>> {
    check_input(&input)?;
    NotificationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Notification", id))?;
    Ok(Json(MessageResponse::updated("Notification")))
}

/// DELETE /api/v1/notifications/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !NotificationRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Notification", id));
    }
    Ok(Json(MessageResponse::deleted("Notification")))
}
