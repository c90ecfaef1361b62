//! Hostel complaint endpoints.
//!
//! Students file complaints; the hostel warden works them through
//! Pending, In Progress, and Resolved. Admins get a read-only view.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use domain::access::{Resource, Role};
use domain::models::hostel_complaint::{
    ComplaintStatus, CreateComplaintRequest, HostelComplaint, ListComplaintsResponse,
    UpdateComplaintStatusRequest,
};
use persistence::repositories::HostelComplaintRepository;
use shared::pagination::PageParams;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_complaint_created;
use crate::middleware::role_gate::{ensure_access, CurrentUser};

#[derive(Debug, Deserialize)]
pub struct ListComplaintsQuery {
    pub status: Option<ComplaintStatus>,
}

/// POST /api/v1/hostel-complaints
pub async fn create_complaint(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateComplaintRequest>,
) -> Result<(StatusCode, Json<HostelComplaint>), ApiError> {
    ensure_access(&user, Resource::ComplaintCreate)?;
    request.validate()?;

    let repo = HostelComplaintRepository::new(state.pool.clone());
    let complaint: HostelComplaint = repo
        .create(
            user.user_id,
            &request.hostel_block,
            &request.room_number,
            &request.issue_type,
            &request.description,
        )
        .await?
        .into();

    record_complaint_created();
    state.activity.log(
        user.user_id,
        "complaint.created",
        Some("hostel_complaint"),
        Some(complaint.id.to_string()),
        None,
    );

    Ok((StatusCode::CREATED, Json(complaint)))
}

/// GET /api/v1/hostel-complaints
///
/// Students see their own complaints; the warden and admin see all of
/// them, optionally filtered by status.
pub async fn list_complaints(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListComplaintsQuery>,
    Query(page): Query<PageParams>,
) -> Result<Json<ListComplaintsResponse>, ApiError> {
    let repo = HostelComplaintRepository::new(state.pool.clone());
    let entities = match user.role {
        Role::Student => {
            repo.list_by_student(user.user_id, page.limit(), page.offset())
                .await?
        }
        Role::HostelWarden | Role::Admin => {
            repo.list_all(
                query.status.map(|s| s.as_str()),
                page.limit(),
                page.offset(),
            )
            .await?
        }
        _ => return Err(ApiError::AccessDenied),
    };

    let complaints: Vec<HostelComplaint> = entities.into_iter().map(Into::into).collect();
    let total = complaints.len();

    Ok(Json(ListComplaintsResponse { complaints, total }))
}

/// PATCH /api/v1/hostel-complaints/:id/status
///
/// Warden only. Moves a complaint through its lifecycle and optionally
/// attaches remarks.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateComplaintStatusRequest>,
) -> Result<Json<HostelComplaint>, ApiError> {
    ensure_access(&user, Resource::ComplaintStatusUpdate)?;
    request.validate()?;

    let repo = HostelComplaintRepository::new(state.pool.clone());
    let complaint: HostelComplaint = repo
        .update_status(
            id,
            request.status.as_str(),
            request.warden_remarks.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Complaint not found".into()))?
        .into();

    state.activity.log(
        user.user_id,
        "complaint.status_changed",
        Some("hostel_complaint"),
        Some(id.to_string()),
        Some(serde_json::json!({ "status": request.status.as_str() })),
    );

    Ok(Json(complaint))
}
