//! Handlers for `/resident-profiles`: personal information plus the
//! resident's registered household.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use residence_core::error::CoreError;
use residence_core::types::DbId;
use residence_core::validation::validate;
use residence_db::models::resident_profile::{
    CreateResidentProfile, ResidentProfile, UpdateResidentProfile,
};
use residence_db::repositories::{ResidentProfileRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, MessageResponse, PageResponse};
use crate::state::AppState;

/// POST /api/v1/resident-profiles
///
/// Residents register their own profile. Admins may name another user via
/// `user_id`.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateResidentProfile>,
) -> AppResult<(StatusCode, Json<ResidentProfile>)> {
    validate(&input)?;

    let user_id = match input.user_id {
        Some(user_id) if user_id != auth.user_id => {
            if !auth.is_admin() {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Residents may only register their own profile".into(),
                )));
            }
            if !UserRepo::exists(&state.pool, user_id).await? {
                return Err(AppError::missing_reference("User", user_id));
            }
            user_id
        }
        _ => auth.user_id,
    };

    if ResidentProfileRepo::find_by_user(&state.pool, user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "User {user_id} already has a resident profile"
        ))));
    }

    let profile = ResidentProfileRepo::create(&state.pool, user_id, &input.profile).await?;
    tracing::info!(
        profile_id = profile.personal.id,
        user_id,
        family_members = profile.family_members.len(),
        "Resident profile created",
    );
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/v1/resident-profiles
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<PageResponse<ResidentProfile>>> {
    let (page, limit, filter) = params.resolve();
    let data = ResidentProfileRepo::list(&state.pool, &filter).await?;
    let total = ResidentProfileRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse {
        data,
        page,
        limit,
        total,
    }))
}

/// GET /api/v1/resident-profiles/search
pub async fn search(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<ResidentProfile>>>> {
    let data = ResidentProfileRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/resident-profiles/me
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ResidentProfile>> {
    let profile = ResidentProfileRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "ResidentProfile for user",
                id: auth.user_id,
            })
        })?;
    Ok(Json(profile))
}

/// GET /api/v1/resident-profiles/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ResidentProfile>> {
    let profile = ResidentProfileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("ResidentProfile", id))?;
    auth.ensure_owner_or_admin(profile.personal.user_id)?;
    Ok(Json(profile))
}

/// PUT /api/v1/resident-profiles/{id}
///
/// Overwrites the personal fields and replaces the household list.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateResidentProfile>,
) -> AppResult<Json<MessageResponse>> {
    validate(&input)?;
    let owner = ResidentProfileRepo::owner_of(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("ResidentProfile", id))?;
    auth.ensure_owner_or_admin(owner)?;

    ResidentProfileRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("ResidentProfile", id))?;
    Ok(Json(MessageResponse::updated("Resident profile")))
}

/// DELETE /api/v1/resident-profiles/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !ResidentProfileRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("ResidentProfile", id));
    }
    Ok(Json(MessageResponse::deleted("Resident profile")))
}
