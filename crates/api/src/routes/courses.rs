//! Course catalogue and course assignment endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use domain::access::Resource;
use domain::models::course::{
    Course, CourseAssignment, CourseAssignmentDetail, CreateCourseAssignmentRequest,
    CreateCourseRequest,
};
use persistence::repositories::CourseRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::role_gate::{ensure_access, CurrentUser};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCoursesQuery {
    pub department_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAssignmentsQuery {
    pub faculty_id: Option<Uuid>,
    pub batch_id: Option<Uuid>,
}

/// GET /api/v1/courses
pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<ListCoursesQuery>,
) -> Result<Json<Vec<Course>>, ApiError> {
    let repo = CourseRepository::new(state.pool.clone());
    let courses = repo
        .list(query.department_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(courses))
}

/// POST /api/v1/courses
pub async fn create_course(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<Course>), ApiError> {
    ensure_access(&user, Resource::CourseManage)?;
    request.validate()?;

    let repo = CourseRepository::new(state.pool.clone());
    let course: Course = repo
        .create(
            &request.code,
            &request.name,
            request.credits,
            request.department_id,
        )
        .await?
        .into();

    state.activity.log(
        user.user_id,
        "course.created",
        Some("course"),
        Some(course.id.to_string()),
        None,
    );

    Ok((StatusCode::CREATED, Json(course)))
}

/// DELETE /api/v1/courses/:id
pub async fn delete_course(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ensure_access(&user, Resource::CourseManage)?;

    let repo = CourseRepository::new(state.pool.clone());
    if repo.delete(id).await? == 0 {
        return Err(ApiError::NotFound("Course not found".into()));
    }

    state.activity.log(
        user.user_id,
        "course.deleted",
        Some("course"),
        Some(id.to_string()),
        None,
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/course-assignments
pub async fn list_assignments(
    State(state): State<AppState>,
    Query(query): Query<ListAssignmentsQuery>,
) -> Result<Json<Vec<CourseAssignmentDetail>>, ApiError> {
    let repo = CourseRepository::new(state.pool.clone());
    let assignments = repo
        .list_assignments(query.faculty_id, query.batch_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(assignments))
}

/// POST /api/v1/course-assignments
pub async fn create_assignment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateCourseAssignmentRequest>,
) -> Result<(StatusCode, Json<CourseAssignment>), ApiError> {
    ensure_access(&user, Resource::CourseManage)?;
    request.validate()?;

    let repo = CourseRepository::new(state.pool.clone());
    let assignment: CourseAssignment = repo
        .create_assignment(
            request.course_id,
            request.faculty_id,
            request.batch_id,
            request.semester,
            request.year,
        )
        .await?
        .into();

    state.activity.log(
        user.user_id,
        "course.assigned",
        Some("course_assignment"),
        Some(assignment.id.to_string()),
        None,
    );

    Ok((StatusCode::CREATED, Json(assignment)))
}

/// DELETE /api/v1/course-assignments/:id
pub async fn delete_assignment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ensure_access(&user, Resource::CourseManage)?;

    let repo = CourseRepository::new(state.pool.clone());
    if repo.delete_assignment(id).await? == 0 {
        return Err(ApiError::NotFound("Course assignment not found".into()));
    }

    state.activity.log(
        user.user_id,
        "course.unassigned",
        Some("course_assignment"),
        Some(id.to_string()),
        None,
    );

    Ok(StatusCode::NO_CONTENT)
}
