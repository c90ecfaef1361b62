//! Timetable endpoints.
//!
//! Any signed-in user can read a batch timetable; the academic section
//! and admin maintain entries. Faculty get a view of their own teaching
//! slots across batches.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::access::{Resource, Role};
use domain::models::timetable::{
    CreateTimetableEntryRequest, ListTimetableQuery, TimetableEntry, UpdateTimetableEntryRequest,
};
use persistence::repositories::TimetableRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::role_gate::{ensure_access, CurrentUser};

/// GET /api/v1/timetable
pub async fn list_for_batch(
    State(state): State<AppState>,
    Query(query): Query<ListTimetableQuery>,
) -> Result<Json<Vec<TimetableEntry>>, ApiError> {
    let repo = TimetableRepository::new(state.pool.clone());
    let entries = repo
        .list_for_batch(query.batch_id, query.day_of_week)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(entries))
}

/// GET /api/v1/timetable/my
///
/// A faculty member's own teaching slots.
pub async fn list_my_slots(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<TimetableEntry>>, ApiError> {
    if user.role != Role::Faculty {
        return Err(ApiError::AccessDenied);
    }

    let repo = TimetableRepository::new(state.pool.clone());
    let entries = repo
        .list_for_faculty(user.user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(entries))
}

/// POST /api/v1/timetable
pub async fn create_entry(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateTimetableEntryRequest>,
) -> Result<(StatusCode, Json<TimetableEntry>), ApiError> {
    ensure_access(&user, Resource::TimetableManage)?;
    request.validate()?;

    let repo = TimetableRepository::new(state.pool.clone());
    let entry: TimetableEntry = repo
        .create(
            request.batch_id,
            request.day_of_week,
            &request.time_slot,
            &request.subject,
            request.room.as_deref(),
            request.faculty_id,
        )
        .await?
        .into();

    state.activity.log(
        user.user_id,
        "timetable.entry_created",
        Some("timetable_entry"),
        Some(entry.id.to_string()),
        None,
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

/// PATCH /api/v1/timetable/:id
pub async fn update_entry(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTimetableEntryRequest>,
) -> Result<Json<TimetableEntry>, ApiError> {
    ensure_access(&user, Resource::TimetableManage)?;
    request.validate()?;

    let repo = TimetableRepository::new(state.pool.clone());
    let entry: TimetableEntry = repo
        .update(
            id,
            request.day_of_week,
            request.time_slot.as_deref(),
            request.subject.as_deref(),
            request.room.as_deref(),
            request.faculty_id,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Timetable entry not found".into()))?
        .into();

    state.activity.log(
        user.user_id,
        "timetable.entry_updated",
        Some("timetable_entry"),
        Some(id.to_string()),
        None,
    );

    Ok(Json(entry))
}

/// DELETE /api/v1/timetable/:id
pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ensure_access(&user, Resource::TimetableManage)?;

    let repo = TimetableRepository::new(state.pool.clone());
    if repo.delete(id).await? == 0 {
        return Err(ApiError::NotFound("Timetable entry not found".into()));
    }

    state.activity.log(
        user.user_id,
        "timetable.entry_deleted",
        Some("timetable_entry"),
        Some(id.to_string()),
        None,
    );

    Ok(StatusCode::NO_CONTENT)
}
