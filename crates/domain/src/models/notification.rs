//! Notification preference domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-user notification channel switches. One row per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email_enabled: bool,
    pub push_enabled: bool,
    pub sms_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

/// Upsert payload. Absent fields keep their stored value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotificationPreferencesRequest {
    pub email_enabled: Option<bool>,
    pub push_enabled: Option<bool>,
    pub sms_enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_update_deserialization() {
        let json = r#"{"pushEnabled": false}"#;
        let req: UpdateNotificationPreferencesRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.push_enabled, Some(false));
        assert_eq!(req.email_enabled, None);
        assert_eq!(req.sms_enabled, None);
    }
}
