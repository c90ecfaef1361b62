//! Timetable domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One scheduled slot for a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub id: Uuid,
    pub batch_id: Uuid,
    /// 0 = Sunday through 6 = Saturday.
    pub day_of_week: i16,
    /// Slot of the form `HH:MM-HH:MM`.
    pub time_slot: String,
    pub subject: String,
    pub room: Option<String>,
    pub faculty_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a timetable entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimetableEntryRequest {
    pub batch_id: Uuid,

    #[validate(custom(function = "shared::validation::validate_day_of_week"))]
    pub day_of_week: i16,

    #[validate(custom(function = "shared::validation::validate_time_slot"))]
    pub time_slot: String,

    #[validate(length(min = 1, max = 150, message = "Subject must be 1-150 characters"))]
    pub subject: String,

    #[validate(length(max = 50))]
    pub room: Option<String>,

    pub faculty_id: Option<Uuid>,
}

/// Request payload for updating a timetable entry (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimetableEntryRequest {
    #[validate(custom(function = "shared::validation::validate_day_of_week"))]
    pub day_of_week: Option<i16>,

    #[validate(custom(function = "shared::validation::validate_time_slot"))]
    pub time_slot: Option<String>,

    #[validate(length(min = 1, max = 150, message = "Subject must be 1-150 characters"))]
    pub subject: Option<String>,

    #[validate(length(max = 50))]
    pub room: Option<String>,

    pub faculty_id: Option<Uuid>,
}

/// Query parameters for listing timetable entries.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTimetableQuery {
    pub batch_id: Uuid,
    pub day_of_week: Option<i16>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn valid_request() -> CreateTimetableEntryRequest {
        CreateTimetableEntryRequest {
            batch_id: Uuid::new_v4(),
            day_of_week: 1,
            time_slot: "09:00-09:55".to_string(),
            subject: "Compiler Design".to_string(),
            room: Some("LH-3".to_string()),
            faculty_id: None,
        }
    }

    #[test]
    fn test_create_request_valid() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_bad_day() {
        let req = CreateTimetableEntryRequest {
            day_of_week: 7,
            ..valid_request()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_bad_slot() {
        let req = CreateTimetableEntryRequest {
            time_slot: "9am-10am".to_string(),
            ..valid_request()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_allows_all_absent() {
        let req = UpdateTimetableEntryRequest {
            day_of_week: None,
            time_slot: None,
            subject: None,
            room: None,
            faculty_id: None,
        };
        assert!(req.validate().is_ok());
    }
}
