//! Announcement endpoints.
//!
//! Admins and faculty post announcements, optionally targeted at a set
//! of roles. An empty target list means everyone. Listing shows urgent
//! announcements first.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::access::{Resource, Role};
use domain::models::announcement::{
    Announcement, CreateAnnouncementRequest, ListAnnouncementsResponse,
};
use persistence::repositories::AnnouncementRepository;
use shared::pagination::PageParams;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::role_gate::{ensure_access, CurrentUser};

/// GET /api/v1/announcements
///
/// Announcements visible to the caller's role, urgent first.
pub async fn list_announcements(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(page): Query<PageParams>,
) -> Result<Json<ListAnnouncementsResponse>, ApiError> {
    let repo = AnnouncementRepository::new(state.pool.clone());
    let announcements: Vec<Announcement> = repo
        .list_visible_to(user.role.as_str(), page.limit(), page.offset())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = announcements.len();

    Ok(Json(ListAnnouncementsResponse {
        announcements,
        total,
    }))
}

/// POST /api/v1/announcements
pub async fn create_announcement(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<Announcement>), ApiError> {
    ensure_access(&user, Resource::AnnouncementCreate)?;
    request.validate()?;

    let target_roles: Vec<String> = request
        .target_roles
        .iter()
        .map(|r| r.as_str().to_string())
        .collect();

    let repo = AnnouncementRepository::new(state.pool.clone());
    let announcement: Announcement = repo
        .create(
            &request.title,
            &request.content,
            request.is_urgent,
            &target_roles,
            user.user_id,
        )
        .await?
        .into();

    state.activity.log(
        user.user_id,
        "announcement.created",
        Some("announcement"),
        Some(announcement.id.to_string()),
        Some(serde_json::json!({ "urgent": request.is_urgent })),
    );

    Ok((StatusCode::CREATED, Json(announcement)))
}

/// DELETE /api/v1/announcements/:id
///
/// The author may delete their own announcement; admins may delete any.
pub async fn delete_announcement(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = AnnouncementRepository::new(state.pool.clone());
    let announcement = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Announcement not found".into()))?;

    if user.role != Role::Admin && announcement.author_id != user.user_id {
        return Err(ApiError::AccessDenied);
    }

    repo.delete(id).await?;

    state.activity.log(
        user.user_id,
        "announcement.deleted",
        Some("announcement"),
        Some(id.to_string()),
        None,
    );

    Ok(StatusCode::NO_CONTENT)
}
