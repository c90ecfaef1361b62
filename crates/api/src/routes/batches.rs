//! Batch and section management endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::access::Resource;
use domain::models::batch::{
    Batch, BatchWithSections, CreateBatchRequest, CreateSectionRequest, Section,
    UpdateBatchRequest,
};
use persistence::repositories::BatchRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::role_gate::{ensure_access, CurrentUser};

/// GET /api/v1/batches
///
/// All batches with their sections, newest intake first.
pub async fn list_batches(
    State(state): State<AppState>,
) -> Result<Json<Vec<BatchWithSections>>, ApiError> {
    let repo = BatchRepository::new(state.pool.clone());

    let mut result = Vec::new();
    for entity in repo.list().await? {
        let batch: Batch = entity.into();
        let sections: Vec<Section> = repo
            .list_sections(batch.id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        result.push(BatchWithSections { batch, sections });
    }

    Ok(Json(result))
}

/// POST /api/v1/batches
pub async fn create_batch(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateBatchRequest>,
) -> Result<(StatusCode, Json<Batch>), ApiError> {
    ensure_access(&user, Resource::BatchManage)?;
    request.validate()?;

    let repo = BatchRepository::new(state.pool.clone());
    let batch: Batch = repo
        .create(&request.name, request.year, request.department_id)
        .await?
        .into();

    state.activity.log(
        user.user_id,
        "batch.created",
        Some("batch"),
        Some(batch.id.to_string()),
        None,
    );

    Ok((StatusCode::CREATED, Json(batch)))
}

/// PATCH /api/v1/batches/:id
pub async fn update_batch(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBatchRequest>,
) -> Result<Json<Batch>, ApiError> {
    ensure_access(&user, Resource::BatchManage)?;
    request.validate()?;

    let repo = BatchRepository::new(state.pool.clone());
    let batch: Batch = repo
        .update(
            id,
            request.name.as_deref(),
            request.year,
            request.department_id,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Batch not found".into()))?
        .into();

    state.activity.log(
        user.user_id,
        "batch.updated",
        Some("batch"),
        Some(id.to_string()),
        None,
    );

    Ok(Json(batch))
}

/// DELETE /api/v1/batches/:id
pub async fn delete_batch(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ensure_access(&user, Resource::BatchManage)?;

    let repo = BatchRepository::new(state.pool.clone());
    if repo.delete(id).await? == 0 {
        return Err(ApiError::NotFound("Batch not found".into()));
    }

    state.activity.log(
        user.user_id,
        "batch.deleted",
        Some("batch"),
        Some(id.to_string()),
        None,
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sections
pub async fn create_section(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateSectionRequest>,
) -> Result<(StatusCode, Json<Section>), ApiError> {
    ensure_access(&user, Resource::BatchManage)?;
    request.validate()?;

    let repo = BatchRepository::new(state.pool.clone());
    if repo.find_by_id(request.batch_id).await?.is_none() {
        return Err(ApiError::NotFound("Batch not found".into()));
    }

    let section: Section = repo
        .create_section(request.batch_id, &request.name)
        .await?
        .into();

    state.activity.log(
        user.user_id,
        "section.created",
        Some("section"),
        Some(section.id.to_string()),
        None,
    );

    Ok((StatusCode::CREATED, Json(section)))
}

/// DELETE /api/v1/sections/:id
pub async fn delete_section(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ensure_access(&user, Resource::BatchManage)?;

    let repo = BatchRepository::new(state.pool.clone());
    if repo.delete_section(id).await? == 0 {
        return Err(ApiError::NotFound("Section not found".into()));
    }

    state.activity.log(
        user.user_id,
        "section.deleted",
        Some("section"),
        Some(id.to_string()),
        None,
    );

    Ok(StatusCode::NO_CONTENT)
}
