//! Hostel complaint entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::hostel_complaint::{ComplaintStatus, HostelComplaint};

/// Database row mapping for the hostel_complaints table.
#[derive(Debug, Clone, FromRow)]
pub struct HostelComplaintEntity {
    pub id: Uuid,
    pub student_id: Uuid,
    pub hostel_block: String,
    pub room_number: String,
    pub issue_type: String,
    pub description: String,
    pub status: String,
    pub warden_remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HostelComplaintEntity> for HostelComplaint {
    fn from(entity: HostelComplaintEntity) -> Self {
        Self {
            id: entity.id,
            student_id: entity.student_id,
            hostel_block: entity.hostel_block,
            room_number: entity.room_number,
            issue_type: entity.issue_type,
            description: entity.description,
            // CHECK constraint restricts the column to the known set
            status: ComplaintStatus::parse(&entity.status).unwrap_or(ComplaintStatus::Pending),
            warden_remarks: entity.warden_remarks,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_to_domain_parses_spaced_status() {
        let entity = HostelComplaintEntity {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            hostel_block: "Block B".to_string(),
            room_number: "B-112".to_string(),
            issue_type: "Plumbing".to_string(),
            description: "Leaking tap".to_string(),
            status: "In Progress".to_string(),
            warden_remarks: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let complaint: HostelComplaint = entity.into();
        assert_eq!(complaint.status, ComplaintStatus::InProgress);
    }
}
