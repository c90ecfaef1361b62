//! Notification preference entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::notification::NotificationPreferences;

/// Database row mapping for the notification_preferences table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationPreferencesEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email_enabled: bool,
    pub push_enabled: bool,
    pub sms_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<NotificationPreferencesEntity> for NotificationPreferences {
    fn from(entity: NotificationPreferencesEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            email_enabled: entity.email_enabled,
            push_enabled: entity.push_enabled,
            sms_enabled: entity.sms_enabled,
            updated_at: entity.updated_at,
        }
    }
}
