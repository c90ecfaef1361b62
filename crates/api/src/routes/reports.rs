//! Reporting endpoints: the portal summary, saved report configurations,
//! generated snapshots, and view tracking.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use domain::access::Resource;
use domain::models::report::{
    CountByKey, CreateReportConfigRequest, PortalSummary, RecordViewRequest, ReportConfig,
    ReportData, ReportView, UpdateReportConfigRequest,
};
use persistence::repositories::{
    AcademicQueryRepository, HostelComplaintRepository, ProfileRepository, ReportRepository,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::role_gate::{ensure_access, CurrentUser};

/// Generated snapshots stay valid for a day before a fresh generation
/// is needed.
const SNAPSHOT_TTL_HOURS: i64 = 24;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConfigsQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// GET /api/v1/reports/summary
///
/// Live aggregate counts across the portal.
pub async fn summary(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<PortalSummary>, ApiError> {
    ensure_access(&user, Resource::Reports)?;

    let summary = build_summary(&state).await?;
    Ok(Json(summary))
}

/// POST /api/v1/reports/configs
pub async fn create_config(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateReportConfigRequest>,
) -> Result<(StatusCode, Json<ReportConfig>), ApiError> {
    ensure_access(&user, Resource::Reports)?;
    request.validate()?;

    let repo = ReportRepository::new(state.pool.clone());
    let config: ReportConfig = repo
        .create_config(
            &request.name,
            &request.report_type,
            request.description.as_deref(),
            &request.config,
            user.user_id,
        )
        .await?
        .into();

    state.activity.log(
        user.user_id,
        "report.config_created",
        Some("report_config"),
        Some(config.id.to_string()),
        None,
    );

    Ok((StatusCode::CREATED, Json(config)))
}

/// GET /api/v1/reports/configs
pub async fn list_configs(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListConfigsQuery>,
) -> Result<Json<Vec<ReportConfig>>, ApiError> {
    ensure_access(&user, Resource::Reports)?;

    let repo = ReportRepository::new(state.pool.clone());
    let configs = repo
        .list_configs(query.include_inactive)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(configs))
}

/// GET /api/v1/reports/configs/:id
pub async fn get_config(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReportConfig>, ApiError> {
    ensure_access(&user, Resource::Reports)?;

    let repo = ReportRepository::new(state.pool.clone());
    let config: ReportConfig = repo
        .find_config_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Report config not found".into()))?
        .into();

    Ok(Json(config))
}

/// PATCH /api/v1/reports/configs/:id
pub async fn update_config(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateReportConfigRequest>,
) -> Result<Json<ReportConfig>, ApiError> {
    ensure_access(&user, Resource::Reports)?;
    request.validate()?;

    let repo = ReportRepository::new(state.pool.clone());
    let config: ReportConfig = repo
        .update_config(
            id,
            request.name.as_deref(),
            request.description.as_deref(),
            request.config.as_ref(),
            request.is_active,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Report config not found".into()))?
        .into();

    state.activity.log(
        user.user_id,
        "report.config_updated",
        Some("report_config"),
        Some(id.to_string()),
        None,
    );

    Ok(Json(config))
}

/// DELETE /api/v1/reports/configs/:id
pub async fn delete_config(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ensure_access(&user, Resource::Reports)?;

    let repo = ReportRepository::new(state.pool.clone());
    if !repo.delete_config(id).await? {
        return Err(ApiError::NotFound("Report config not found".into()));
    }

    state.activity.log(
        user.user_id,
        "report.config_deleted",
        Some("report_config"),
        Some(id.to_string()),
        None,
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/reports/configs/:id/generate
///
/// Generates a fresh snapshot of the portal summary for this config and
/// stores it with a 24-hour expiry.
pub async fn generate(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<ReportData>), ApiError> {
    ensure_access(&user, Resource::Reports)?;

    let repo = ReportRepository::new(state.pool.clone());
    if repo.find_config_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound("Report config not found".into()));
    }

    let summary = build_summary(&state).await?;
    let payload = serde_json::to_value(&summary)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize report: {}", e)))?;

    let expires_at = Utc::now() + Duration::hours(SNAPSHOT_TTL_HOURS);
    let data: ReportData = repo
        .insert_data(id, &payload, user.user_id, Some(expires_at))
        .await?
        .into();

    state.activity.log(
        user.user_id,
        "report.generated",
        Some("report_config"),
        Some(id.to_string()),
        None,
    );

    Ok((StatusCode::CREATED, Json(data)))
}

/// GET /api/v1/reports/configs/:id/data
///
/// The latest unexpired snapshot for this config.
pub async fn latest_data(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReportData>, ApiError> {
    ensure_access(&user, Resource::Reports)?;

    let repo = ReportRepository::new(state.pool.clone());
    let data: ReportData = repo
        .find_latest_data(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No report data available".into()))?
        .into();

    Ok(Json(data))
}

/// POST /api/v1/reports/configs/:id/views
pub async fn record_view(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordViewRequest>,
) -> Result<(StatusCode, Json<ReportView>), ApiError> {
    ensure_access(&user, Resource::Reports)?;
    request.validate()?;

    let repo = ReportRepository::new(state.pool.clone());
    let view: ReportView = repo
        .record_view(id, user.user_id, request.view_duration)
        .await?
        .into();

    Ok((StatusCode::CREATED, Json(view)))
}

async fn build_summary(state: &AppState) -> Result<PortalSummary, ApiError> {
    let profiles = ProfileRepository::new(state.pool.clone());
    let queries = AcademicQueryRepository::new(state.pool.clone());
    let complaints = HostelComplaintRepository::new(state.pool.clone());

    Ok(PortalSummary {
        users_by_role: to_counts(profiles.count_by_role().await?),
        queries_by_status: to_counts(queries.count_by_status().await?),
        complaints_by_status: to_counts(complaints.count_by_status().await?),
    })
}

fn to_counts(rows: Vec<(String, i64)>) -> Vec<CountByKey> {
    rows.into_iter()
        .map(|(key, count)| CountByKey { key, count })
        .collect()
}
