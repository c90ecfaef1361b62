//! Batch and section domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A year-wise student intake, optionally tied to a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub department_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A section within a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: Uuid,
    pub name: String,
    pub batch_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a batch.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,

    #[validate(custom(function = "shared::validation::validate_academic_year"))]
    pub year: i32,

    pub department_id: Option<Uuid>,
}

/// Request payload for updating a batch (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBatchRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "shared::validation::validate_academic_year"))]
    pub year: Option<i32>,

    pub department_id: Option<Uuid>,
}

/// Request payload for creating a section under a batch.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSectionRequest {
    #[validate(length(min = 1, max = 10, message = "Name must be 1-10 characters"))]
    pub name: String,

    pub batch_id: Uuid,
}

/// Response for listing batches with their sections.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchWithSections {
    #[serde(flatten)]
    pub batch: Batch,
    pub sections: Vec<Section>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_batch_request_validation() {
        let req = CreateBatchRequest {
            name: "B.Tech 2023".to_string(),
            year: 2023,
            department_id: None,
        };
        assert!(req.validate().is_ok());

        let bad_year = CreateBatchRequest { year: 1987, ..req };
        assert!(bad_year.validate().is_err());
    }

    #[test]
    fn test_batch_with_sections_flattens_batch_fields() {
        let batch = Batch {
            id: Uuid::new_v4(),
            name: "2023".to_string(),
            year: 2023,
            department_id: None,
            created_at: Utc::now(),
        };
        let payload = BatchWithSections {
            batch,
            sections: vec![],
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"name\":\"2023\""));
        assert!(json.contains("\"sections\":[]"));
        assert!(!json.contains("\"batch\":{"));
    }
}
