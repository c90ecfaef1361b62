//! Registration, login, token refresh, and logout.

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain::access::Role;
use domain::models::profile::{Profile, ProfileResponse};
use persistence::repositories::ProfileRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_user_registered;
use crate::middleware::role_gate::CurrentUser;
use crate::services::auth::{AuthService, AuthTokens};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
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

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub profile: ProfileResponse,
}

impl From<AuthTokens> for AuthResponse {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in_secs,
            profile: tokens.profile,
        }
    }
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;

    let service = AuthService::new(state.pool.clone(), &state.config.jwt)?;
    let tokens = service
        .register(
            &request.email,
            &request.password,
            &request.full_name,
            request.role.as_str(),
            request.department.as_deref(),
            request.batch.as_deref(),
            request.roll_number.as_deref(),
        )
        .await?;

    record_user_registered(request.role.as_str());
    tracing::info!(role = %request.role, "New account registered");

    Ok((StatusCode::CREATED, Json(tokens.into())))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;

    let service = AuthService::new(state.pool.clone(), &state.config.jwt)?;
    let tokens = service.login(&request.email, &request.password).await?;

    Ok(Json(tokens.into()))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let service = AuthService::new(state.pool.clone(), &state.config.jwt)?;
    let tokens = service.refresh(&request.refresh_token).await?;

    Ok(Json(tokens.into()))
}

/// GET /api/v1/auth/me
///
/// Minimal identity summary for the signed-in user. One profile lookup,
/// no session mutation.
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<MeResponse>, ApiError> {
    let repo = ProfileRepository::new(state.pool.clone());
    let profile: Profile = repo
        .find_by_user_id(user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".into()))?
        .into();

    Ok(Json(MeResponse {
        email: profile.email,
        full_name: profile.full_name,
        role: profile.role,
    }))
}

/// POST /api/v1/auth/logout
///
/// Drops the session tied to the presented access token.
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<StatusCode, ApiError> {
    let service = AuthService::new(state.pool.clone(), &state.config.jwt)?;
    service.logout(&user.jti).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let req = RegisterRequest {
            email: "student@iiitm.ac.in".to_string(),
            password: "correct-horse".to_string(),
            full_name: "A Student".to_string(),
            role: Role::Student,
            department: None,
            batch: None,
            roll_number: None,
        };
        assert!(req.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "correct-horse".to_string(),
            full_name: "A Student".to_string(),
            role: Role::Student,
            department: None,
            batch: None,
            roll_number: None,
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            email: "student@iiitm.ac.in".to_string(),
            password: "short".to_string(),
            full_name: "A Student".to_string(),
            role: Role::Student,
            department: None,
            batch: None,
            roll_number: None,
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_register_request_parses_two_word_role() {
        let json = r#"{
            "email": "warden@iiitm.ac.in",
            "password": "password123",
            "fullName": "The Warden",
            "role": "Hostel Warden"
        }"#;
        let req: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.role, Role::HostelWarden);
    }

    #[test]
    fn test_register_request_rejects_unknown_role() {
        let json = r#"{
            "email": "x@iiitm.ac.in",
            "password": "password123",
            "fullName": "X",
            "role": "Registrar"
        }"#;
        assert!(serde_json::from_str::<RegisterRequest>(json).is_err());
    }
}
