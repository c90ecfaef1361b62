//! Backend health repository for database operations.

use sqlx::PgPool;

use crate::entities::ServiceHealthEntity;
use crate::metrics::QueryTimer;

/// Repository for recorded service health probes.
#[derive(Clone)]
pub struct BackendHealthRepository {
    pool: PgPool,
}

impl BackendHealthRepository {
    /// Creates a new BackendHealthRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record the outcome of a health probe.
    pub async fn record(
        &self,
        service_name: &str,
        status: &str,
        response_time_ms: Option<i32>,
        error_message: Option<&str>,
    ) -> Result<ServiceHealthEntity, sqlx::Error> {
        let timer = QueryTimer::new("record_service_health");
        let result = sqlx::query_as::<_, ServiceHealthEntity>(
            r#"
            INSERT INTO backend_health (service_name, status, response_time_ms, error_message)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(service_name)
        .bind(status)
        .bind(response_time_ms)
        .bind(error_message)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Latest recorded probe per service.
    pub async fn latest_per_service(&self) -> Result<Vec<ServiceHealthEntity>, sqlx::Error> {
        let timer = QueryTimer::new("latest_service_health");
        let result = sqlx::query_as::<_, ServiceHealthEntity>(
            r#"
            SELECT DISTINCT ON (service_name) *
            FROM backend_health
            ORDER BY service_name, last_check DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
