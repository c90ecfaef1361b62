//! Notification preference repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::NotificationPreferencesEntity;
use crate::metrics::QueryTimer;

/// Repository for per-user notification channel preferences.
#[derive(Clone)]
pub struct NotificationPreferencesRepository {
    pool: PgPool,
}

impl NotificationPreferencesRepository {
    /// Creates a new NotificationPreferencesRepository with the given
    /// connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a user's preferences, if a row exists.
    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<NotificationPreferencesEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_notification_preferences");
        let result = sqlx::query_as::<_, NotificationPreferencesEntity>(
            r#"
            SELECT * FROM notification_preferences WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Upsert a user's preferences. Absent fields keep their stored value,
    /// or the column default on first write.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        email_enabled: Option<bool>,
        push_enabled: Option<bool>,
        sms_enabled: Option<bool>,
    ) -> Result<NotificationPreferencesEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_notification_preferences");
        let result = sqlx::query_as::<_, NotificationPreferencesEntity>(
            r#"
            INSERT INTO notification_preferences (user_id, email_enabled, push_enabled, sms_enabled)
            VALUES ($1, COALESCE($2, TRUE), COALESCE($3, TRUE), COALESCE($4, FALSE))
            ON CONFLICT (user_id)
            DO UPDATE SET
                email_enabled = COALESCE($2, notification_preferences.email_enabled),
                push_enabled = COALESCE($3, notification_preferences.push_enabled),
                sms_enabled = COALESCE($4, notification_preferences.sms_enabled),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(email_enabled)
        .bind(push_enabled)
        .bind(sms_enabled)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
