//! Role resolution middleware and access checks.
//!
//! Loads the authenticated user's profile once per request and exposes it
//! to handlers, which gate privileged operations with [`ensure_access`].

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use domain::access::{can_access, Resource, Role};
use persistence::repositories::ProfileRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::UserAuth;

/// The authenticated user together with their portal role.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub role: Role,
    pub jti: String,
}

/// Middleware that resolves the authenticated user's role.
///
/// Must run after `require_user_auth`. Looks up the profile for the JWT
/// subject and stores a [`CurrentUser`] in request extensions. A token
/// whose user no longer has a profile is rejected.
pub async fn load_current_user(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth = match req.extensions().get::<UserAuth>() {
        Some(auth) => auth.clone(),
        None => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "unauthorized",
                    "message": "Authentication required"
                })),
            )
                .into_response();
        }
    };

    let repo = ProfileRepository::new(state.pool.clone());
    match repo.find_by_user_id(auth.user_id).await {
        Ok(Some(profile)) => {
            let profile: domain::models::profile::Profile = profile.into();
            req.extensions_mut().insert(CurrentUser {
                user_id: auth.user_id,
                role: profile.role,
                jti: auth.jti,
            });
            next.run(req).await
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "unauthorized",
                "message": "Unknown user"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Profile lookup failed: {}", e);
            ApiError::Internal(e.to_string()).into_response()
        }
    }
}

/// Check that the user's role may touch the given resource.
///
/// Denials return the portal's uniform Access Denied error; callers must
/// not fetch any data before this check passes.
pub fn ensure_access(user: &CurrentUser, resource: Resource) -> Result<(), ApiError> {
    if can_access(user.role, resource) {
        Ok(())
    } else {
        Err(ApiError::AccessDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: Role) -> CurrentUser {
        CurrentUser {
            user_id: Uuid::new_v4(),
            role,
            jti: "jti".to_string(),
        }
    }

    #[test]
    fn test_ensure_access_allows_admin_dashboard() {
        let user = user_with_role(Role::Admin);
        assert!(ensure_access(&user, Resource::AdminDashboard).is_ok());
    }

    #[test]
    fn test_ensure_access_denies_student_admin_dashboard() {
        let user = user_with_role(Role::Student);
        let err = ensure_access(&user, Resource::AdminDashboard).unwrap_err();
        assert!(matches!(err, ApiError::AccessDenied));
    }

    #[test]
    fn test_ensure_access_warden_complaint_status() {
        let warden = user_with_role(Role::HostelWarden);
        assert!(ensure_access(&warden, Resource::ComplaintStatusUpdate).is_ok());

        let faculty = user_with_role(Role::Faculty);
        assert!(ensure_access(&faculty, Resource::ComplaintStatusUpdate).is_err());
    }

    #[test]
    fn test_ensure_access_mess_supervisor_menus() {
        let supervisor = user_with_role(Role::MessSupervisor);
        assert!(ensure_access(&supervisor, Resource::MessMenuManage).is_ok());

        let admin = user_with_role(Role::Admin);
        assert!(ensure_access(&admin, Resource::MessMenuManage).is_ok());

        let student = user_with_role(Role::Student);
        assert!(ensure_access(&student, Resource::MessMenuManage).is_err());
    }

    #[test]
    fn test_current_user_clone() {
        let user = user_with_role(Role::Director);
        let cloned = user.clone();
        assert_eq!(user.user_id, cloned.user_id);
        assert_eq!(user.role, cloned.role);
    }
}
