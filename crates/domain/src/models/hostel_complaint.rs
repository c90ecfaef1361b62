//! Hostel complaint domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Complaint workflow status. Any-to-any transitions are allowed, but only
/// the Hostel Warden can perform them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplaintStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "Pending",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::Resolved => "Resolved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(ComplaintStatus::Pending),
            "In Progress" => Some(ComplaintStatus::InProgress),
            "Resolved" => Some(ComplaintStatus::Resolved),
            _ => None,
        }
    }
}

/// A hostel maintenance complaint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostelComplaint {
    pub id: Uuid,
    pub student_id: Uuid,
    pub hostel_block: String,
    pub room_number: String,
    pub issue_type: String,
    pub description: String,
    pub status: ComplaintStatus,
    pub warden_remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for filing a complaint. New complaints start `Pending`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintRequest {
    #[validate(length(min = 1, max = 50, message = "Hostel block must be 1-50 characters"))]
    pub hostel_block: String,

    #[validate(length(min = 1, max = 20, message = "Room number must be 1-20 characters"))]
    pub room_number: String,

    #[validate(length(min = 1, max = 50, message = "Issue type must be 1-50 characters"))]
    pub issue_type: String,

    #[validate(length(min = 1, max = 2000, message = "Description must be 1-2000 characters"))]
    pub description: String,
}

/// Request payload for the warden's status update.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComplaintStatusRequest {
    pub status: ComplaintStatus,

    #[validate(length(max = 2000, message = "Remarks must be at most 2000 characters"))]
    pub warden_remarks: Option<String>,
}

/// Response for listing complaints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListComplaintsResponse {
    pub complaints: Vec<HostelComplaint>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            ComplaintStatus::Pending,
            ComplaintStatus::InProgress,
            ComplaintStatus::Resolved,
        ] {
            assert_eq!(ComplaintStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ComplaintStatus::parse("InProgress"), None);
        assert_eq!(ComplaintStatus::parse("pending"), None);
    }

    #[test]
    fn test_in_progress_serializes_with_space() {
        let json = serde_json::to_string(&ComplaintStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");

        let status: ComplaintStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(status, ComplaintStatus::InProgress);
    }

    #[test]
    fn test_create_request_validation() {
        use validator::Validate;

        let req = CreateComplaintRequest {
            hostel_block: "Block A".to_string(),
            room_number: "A-214".to_string(),
            issue_type: "Electrical".to_string(),
            description: "Ceiling fan not working".to_string(),
        };
        assert!(req.validate().is_ok());

        let empty_description = CreateComplaintRequest {
            description: String::new(),
            ..req
        };
        assert!(empty_description.validate().is_err());
    }

    #[test]
    fn test_status_update_request_deserialization() {
        let json = r#"{"status": "In Progress", "wardenRemarks": "Electrician scheduled"}"#;
        let req: UpdateComplaintStatusRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.status, ComplaintStatus::InProgress);
        assert_eq!(req.warden_remarks.as_deref(), Some("Electrician scheduled"));
    }
}
