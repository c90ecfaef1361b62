//! Holiday calendar endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use domain::access::Resource;
use domain::models::holiday::{CreateHolidayRequest, Holiday};
use persistence::repositories::HolidayRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::role_gate::{ensure_access, CurrentUser};

#[derive(Debug, Deserialize)]
pub struct ListHolidaysQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// GET /api/v1/holidays
pub async fn list_holidays(
    State(state): State<AppState>,
    Query(query): Query<ListHolidaysQuery>,
) -> Result<Json<Vec<Holiday>>, ApiError> {
    let repo = HolidayRepository::new(state.pool.clone());
    let holidays = repo
        .list(query.from, query.to)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(holidays))
}

/// POST /api/v1/holidays
pub async fn create_holiday(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateHolidayRequest>,
) -> Result<(StatusCode, Json<Holiday>), ApiError> {
    ensure_access(&user, Resource::HolidayManage)?;
    request.validate()?;

    let repo = HolidayRepository::new(state.pool.clone());
    let holiday: Holiday = repo
        .create(&request.name, request.date, &request.holiday_type)
        .await?
        .into();

    state.activity.log(
        user.user_id,
        "holiday.created",
        Some("holiday"),
        Some(holiday.id.to_string()),
        None,
    );

    Ok((StatusCode::CREATED, Json(holiday)))
}

/// DELETE /api/v1/holidays/:id
pub async fn delete_holiday(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ensure_access(&user, Resource::HolidayManage)?;

    let repo = HolidayRepository::new(state.pool.clone());
    if repo.delete(id).await? == 0 {
        return Err(ApiError::NotFound("Holiday not found".into()));
    }

    state.activity.log(
        user.user_id,
        "holiday.deleted",
        Some("holiday"),
        Some(id.to_string()),
        None,
    );

    Ok(StatusCode::NO_CONTENT)
}
