//! Department management endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use domain::access::Resource;
use domain::models::department::{
    CreateDepartmentRequest, Department, DepartmentType, ListDepartmentsResponse,
    UpdateDepartmentRequest,
};
use persistence::repositories::DepartmentRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::role_gate::{ensure_access, CurrentUser};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDepartmentsQuery {
    pub department_type: Option<DepartmentType>,
}

/// GET /api/v1/departments
///
/// Readable by any signed-in user; the portal shows departments in
/// several role dashboards.
pub async fn list_departments(
    State(state): State<AppState>,
    Query(query): Query<ListDepartmentsQuery>,
) -> Result<Json<ListDepartmentsResponse>, ApiError> {
    let repo = DepartmentRepository::new(state.pool.clone());
    let departments: Vec<Department> = repo
        .list(query.department_type.map(|t| t.as_str()))
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = departments.len();

    Ok(Json(ListDepartmentsResponse { departments, total }))
}

/// POST /api/v1/departments
pub async fn create_department(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateDepartmentRequest>,
) -> Result<(StatusCode, Json<Department>), ApiError> {
    ensure_access(&user, Resource::DepartmentManage)?;
    request.validate()?;

    let repo = DepartmentRepository::new(state.pool.clone());
    let department: Department = repo
        .create(
            &request.name,
            &request.code,
            request.department_type.as_str(),
            request.hod_id,
        )
        .await?
        .into();

    state.activity.log(
        user.user_id,
        "department.created",
        Some("department"),
        Some(department.id.to_string()),
        None,
    );

    Ok((StatusCode::CREATED, Json(department)))
}

/// PATCH /api/v1/departments/:id
pub async fn update_department(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDepartmentRequest>,
) -> Result<Json<Department>, ApiError> {
    ensure_access(&user, Resource::DepartmentManage)?;
    request.validate()?;

    let repo = DepartmentRepository::new(state.pool.clone());
    let department: Department = repo
        .update(
            id,
            request.name.as_deref(),
            request.code.as_deref(),
            request.hod_id,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Department not found".into()))?
        .into();

    state.activity.log(
        user.user_id,
        "department.updated",
        Some("department"),
        Some(id.to_string()),
        None,
    );

    Ok(Json(department))
}

/// DELETE /api/v1/departments/:id
pub async fn delete_department(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ensure_access(&user, Resource::DepartmentManage)?;

    let repo = DepartmentRepository::new(state.pool.clone());
    let deleted = repo.delete(id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Department not found".into()));
    }

    state.activity.log(
        user.user_id,
        "department.deleted",
        Some("department"),
        Some(id.to_string()),
        None,
    );

    Ok(StatusCode::NO_CONTENT)
}
