//! Admin-only activity log listing.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use domain::access::Resource;
use domain::models::activity_log::ListActivityLogsResponse;
use persistence::repositories::ActivityLogRepository;
use shared::pagination::PageParams;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::role_gate::{ensure_access, CurrentUser};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLogsQuery {
    pub user_id: Option<Uuid>,
}

/// GET /api/v1/admin/activity-logs
pub async fn list_logs(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListLogsQuery>,
    Query(page): Query<PageParams>,
) -> Result<Json<ListActivityLogsResponse>, ApiError> {
    ensure_access(&user, Resource::ActivityLogs)?;

    let repo = ActivityLogRepository::new(state.pool.clone());
    let logs = repo
        .list(query.user_id, page.limit(), page.offset())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = repo.count(query.user_id).await?;

    Ok(Json(ListActivityLogsResponse { logs, total }))
}
