//! Health check endpoints.
//!
//! The public probes back the load balancer and orchestration; the admin
//! overview persists probe results so the dashboard can show history.

use std::time::Instant;

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Serialize;

use domain::access::Resource;
use domain::models::health::BackendHealthResponse;
use persistence::repositories::BackendHealthRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::role_gate::{ensure_access, CurrentUser};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// GET /api/health
///
/// Full health check including a database round trip.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (db, healthy) = probe_database(&state).await;

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db,
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}

/// GET /api/health/ready
///
/// Readiness probe: the service can take traffic once the pool answers.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<StatusResponse>) {
    let (_, healthy) = probe_database(&state).await;
    if healthy {
        (
            StatusCode::OK,
            Json(StatusResponse {
                status: "ready".to_string(),
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(StatusResponse {
                status: "not ready".to_string(),
            }),
        )
    }
}

/// GET /api/health/live
///
/// Liveness probe: answers as long as the process is running.
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "alive".to_string(),
    })
}

/// GET /api/v1/admin/backend-health
///
/// Admin-only: runs a fresh probe, records it, and returns the latest
/// recorded state of every service.
pub async fn backend_health(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<BackendHealthResponse>, ApiError> {
    ensure_access(&user, Resource::BackendHealth)?;

    let (db, _) = probe_database(&state).await;
    let repo = BackendHealthRepository::new(state.pool.clone());
    repo.record(
        "database",
        &db.status,
        db.response_time_ms,
        if db.status == "down" {
            Some("database ping failed")
        } else {
            None
        },
    )
    .await?;

    let services = repo
        .latest_per_service()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(BackendHealthResponse { services }))
}

async fn probe_database(state: &AppState) -> (DatabaseHealth, bool) {
    let start = Instant::now();
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            DatabaseHealth {
                status: "healthy".to_string(),
                response_time_ms: Some(start.elapsed().as_millis() as i32),
            },
            true,
        ),
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            (
                DatabaseHealth {
                    status: "down".to_string(),
                    response_time_ms: None,
                },
                false,
            )
        }
    }
}
