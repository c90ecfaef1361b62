//! Backend health check domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of one service probe, persisted for the admin health page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    pub id: i64,
    pub service_name: String,
    /// "healthy", "degraded", or "down".
    pub status: String,
    pub response_time_ms: Option<i32>,
    pub error_message: Option<String>,
    pub last_check: DateTime<Utc>,
}

/// Response for the admin health overview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendHealthResponse {
    pub services: Vec<ServiceHealth>,
}
