//! Profile endpoints for the signed-in user.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::access::{capabilities, Resource, RoleCapabilities};
use domain::models::profile::{Profile, ProfileResponse, UpdateProfileRequest};
use persistence::repositories::ProfileRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::role_gate::{ensure_access, CurrentUser};

/// GET /api/v1/profiles/me
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let repo = ProfileRepository::new(state.pool.clone());
    let profile: Profile = repo
        .find_by_user_id(user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".into()))?
        .into();

    Ok(Json(profile.into()))
}

/// PATCH /api/v1/profiles/me
///
/// Partial update of the caller's own profile. Role is not updatable
/// here; role changes go through user management.
pub async fn update_me(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    request.validate()?;

    let repo = ProfileRepository::new(state.pool.clone());
    let profile: Profile = repo
        .update(
            user.user_id,
            request.full_name.as_deref(),
            request.department.as_deref(),
            request.batch.as_deref(),
            request.phone.as_deref(),
            request.roll_number.as_deref(),
            request.bio.as_deref(),
            request.avatar_url.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".into()))?
        .into();

    state
        .activity
        .log(user.user_id, "profile.updated", Some("profile"), None, None);

    Ok(Json(profile.into()))
}

/// GET /api/v1/profiles/:user_id
///
/// Another user's profile. Restricted to user management.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, ApiError> {
    ensure_access(&user, Resource::UserManagement)?;

    let repo = ProfileRepository::new(state.pool.clone());
    let profile: Profile = repo
        .find_by_user_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".into()))?
        .into();

    Ok(Json(profile.into()))
}

/// GET /api/v1/profiles/me/capabilities
///
/// The caller's role capabilities and navigation entries, resolved from
/// the server-side access table.
pub async fn my_capabilities(
    Extension(user): Extension<CurrentUser>,
) -> Json<RoleCapabilities> {
    Json(capabilities(user.role))
}
