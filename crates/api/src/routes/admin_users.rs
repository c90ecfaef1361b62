//! Admin user management: creating accounts, listing them, changing roles.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use domain::access::{Resource, Role};
use domain::models::profile::{ListProfilesResponse, Profile, ProfileResponse};
use persistence::repositories::{ProfileRepository, UserRepository};
use shared::pagination::PageParams;
use shared::password::hash_password;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_user_registered;
use crate::middleware::role_gate::{ensure_access, CurrentUser};

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: String,

    pub role: Role,

    #[validate(length(max = 100))]
    pub department: Option<String>,

    #[validate(length(max = 50))]
    pub batch: Option<String>,

    #[validate(length(max = 30))]
    pub roll_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// POST /api/v1/admin/users
///
/// Creates an account on someone's behalf. Unlike registration this does
/// not sign the new user in.
pub async fn create_user(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), ApiError> {
    ensure_access(&user, Resource::UserManagement)?;
    request.validate()?;

    let users = UserRepository::new(state.pool.clone());
    if users.find_by_email(&request.email).await?.is_some() {
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let password_hash =
        hash_password(&request.password).map_err(|e| ApiError::Internal(e.to_string()))?;
    let (created, profile) = users
        .create_with_profile(
            &request.email,
            &password_hash,
            &request.full_name,
            request.role.as_str(),
            request.department.as_deref(),
            request.batch.as_deref(),
            request.roll_number.as_deref(),
        )
        .await?;

    record_user_registered(request.role.as_str());
    state.activity.log(
        user.user_id,
        "user.created",
        Some("user"),
        Some(created.id.to_string()),
        Some(serde_json::json!({ "role": request.role.as_str() })),
    );

    let profile: Profile = profile.into();
    Ok((StatusCode::CREATED, Json(profile.into())))
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListUsersQuery>,
    Query(page): Query<PageParams>,
) -> Result<Json<ListProfilesResponse>, ApiError> {
    ensure_access(&user, Resource::UserManagement)?;

    let repo = ProfileRepository::new(state.pool.clone());
    let role = query.role.map(|r| r.as_str());
    let profiles = repo
        .list(role, page.limit(), page.offset())
        .await?
        .into_iter()
        .map(|e| ProfileResponse::from(Profile::from(e)))
        .collect();
    let total = repo.count(role).await?;

    Ok(Json(ListProfilesResponse { profiles, total }))
}

/// PATCH /api/v1/admin/users/:user_id/role
pub async fn update_role(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    ensure_access(&user, Resource::UserManagement)?;

    let repo = ProfileRepository::new(state.pool.clone());
    let profile: Profile = repo
        .update_role(user_id, request.role.as_str())
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?
        .into();

    state.activity.log(
        user.user_id,
        "user.role_changed",
        Some("profile"),
        Some(user_id.to_string()),
        Some(serde_json::json!({ "role": request.role.as_str() })),
    );

    Ok(Json(profile.into()))
}
