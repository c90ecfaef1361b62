//! Backend health entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::health::ServiceHealth;

/// Database row mapping for the backend_health table.
#[derive(Debug, Clone, FromRow)]
pub struct ServiceHealthEntity {
    pub id: i64,
    pub service_name: String,
    pub status: String,
    pub response_time_ms: Option<i32>,
    pub error_message: Option<String>,
    pub last_check: DateTime<Utc>,
}

impl From<ServiceHealthEntity> for ServiceHealth {
    fn from(entity: ServiceHealthEntity) -> Self {
        Self {
            id: entity.id,
            service_name: entity.service_name,
            status: entity.status,
            response_time_ms: entity.response_time_ms,
            error_message: entity.error_message,
            last_check: entity.last_check,
        }
    }
}
