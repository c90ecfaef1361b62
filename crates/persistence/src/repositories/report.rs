//! Report repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ReportConfigEntity, ReportDataEntity, ReportViewEntity};
use crate::metrics::QueryTimer;

/// Repository for report configurations, cached results, and view logs.
#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    /// Creates a new ReportRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a report configuration.
    pub async fn create_config(
        &self,
        name: &str,
        report_type: &str,
        description: Option<&str>,
        config: &serde_json::Value,
        created_by: Uuid,
    ) -> Result<ReportConfigEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_report_config");
        let result = sqlx::query_as::<_, ReportConfigEntity>(
            r#"
            INSERT INTO reports_config (name, report_type, description, config, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(report_type)
        .bind(description)
        .bind(config)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a report configuration by ID.
    pub async fn find_config_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ReportConfigEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_report_config_by_id");
        let result = sqlx::query_as::<_, ReportConfigEntity>(
            r#"
            SELECT * FROM reports_config WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List report configurations, active ones only unless asked otherwise.
    pub async fn list_configs(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<ReportConfigEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_report_configs");
        let result = sqlx::query_as::<_, ReportConfigEntity>(
            r#"
            SELECT * FROM reports_config
            WHERE is_active OR $1
            ORDER BY name
            "#,
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partial update of a report configuration.
    pub async fn update_config(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        config: Option<&serde_json::Value>,
        is_active: Option<bool>,
    ) -> Result<Option<ReportConfigEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_report_config");
        let result = sqlx::query_as::<_, ReportConfigEntity>(
            r#"
            UPDATE reports_config SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                config = COALESCE($4, config),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(config)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a report configuration. Snapshots and view records go with
    /// it via cascade.
    pub async fn delete_config(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_report_config");
        let result = sqlx::query("DELETE FROM reports_config WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    /// Store a generated report payload.
    pub async fn insert_data(
        &self,
        report_config_id: Uuid,
        data: &serde_json::Value,
        generated_by: Uuid,
        expires_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<ReportDataEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_report_data");
        let result = sqlx::query_as::<_, ReportDataEntity>(
            r#"
            INSERT INTO reports_data (report_config_id, data, generated_by, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(report_config_id)
        .bind(data)
        .bind(generated_by)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Latest unexpired payload for a report configuration.
    pub async fn find_latest_data(
        &self,
        report_config_id: Uuid,
    ) -> Result<Option<ReportDataEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_latest_report_data");
        let result = sqlx::query_as::<_, ReportDataEntity>(
            r#"
            SELECT * FROM reports_data
            WHERE report_config_id = $1
              AND (expires_at IS NULL OR expires_at > NOW())
            ORDER BY generated_at DESC
            LIMIT 1
            "#,
        )
        .bind(report_config_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Record that someone opened a report.
    pub async fn record_view(
        &self,
        report_config_id: Uuid,
        viewed_by: Uuid,
        view_duration: Option<i32>,
    ) -> Result<ReportViewEntity, sqlx::Error> {
        let timer = QueryTimer::new("record_report_view");
        let result = sqlx::query_as::<_, ReportViewEntity>(
            r#"
            INSERT INTO report_views (report_config_id, viewed_by, view_duration)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(report_config_id)
        .bind(viewed_by)
        .bind(view_duration)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
