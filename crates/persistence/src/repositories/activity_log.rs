//! Activity log repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ActivityLogEntity;
use crate::metrics::QueryTimer;

/// Append-only audit trail of admin-relevant actions.
#[derive(Clone)]
pub struct ActivityLogRepository {
    pool: PgPool,
}

impl ActivityLogRepository {
    /// Creates a new ActivityLogRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a log entry.
    pub async fn insert(
        &self,
        user_id: Uuid,
        action: &str,
        target_type: Option<&str>,
        target_id: Option<&str>,
        details: Option<&serde_json::Value>,
    ) -> Result<ActivityLogEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_activity_log");
        let result = sqlx::query_as::<_, ActivityLogEntity>(
            r#"
            INSERT INTO activity_logs (user_id, action, target_type, target_id, details)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(action)
        .bind(target_type)
        .bind(target_id)
        .bind(details)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List log entries, optionally for one user, newest first.
    pub async fn list(
        &self,
        user_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ActivityLogEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_activity_logs");
        let result = sqlx::query_as::<_, ActivityLogEntity>(
            r#"
            SELECT * FROM activity_logs
            WHERE ($1::UUID IS NULL OR user_id = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Total entry count, optionally for one user.
    pub async fn count(&self, user_id: Option<Uuid>) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_activity_logs");
        let result = sqlx::query_as::<_, (i64,)>(
            r#"
            SELECT COUNT(*) FROM activity_logs
            WHERE ($1::UUID IS NULL OR user_id = $1)
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(result.0)
    }
}
