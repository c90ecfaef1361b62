//! Holiday calendar domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// An institute holiday.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    /// "gazetted", "restricted", or "institute".
    pub holiday_type: String,
    pub created_at: DateTime<Utc>,
}

/// Request payload for adding a holiday.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHolidayRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    pub date: NaiveDate,

    #[validate(length(min = 1, max = 30, message = "Type must be 1-30 characters"))]
    pub holiday_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserialization() {
        let json = r#"{"name": "Republic Day", "date": "2027-01-26", "holidayType": "gazetted"}"#;
        let req: CreateHolidayRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "Republic Day");
        assert_eq!(req.date, NaiveDate::from_ymd_opt(2027, 1, 26).unwrap());
    }
}
