//! Department domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Departments come in two flavours: academic units that own batches and
/// courses, and faculty units used for staffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepartmentType {
    Academic,
    Faculty,
}

impl DepartmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepartmentType::Academic => "academic",
            DepartmentType::Faculty => "faculty",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "academic" => Some(DepartmentType::Academic),
            "faculty" => Some(DepartmentType::Faculty),
            _ => None,
        }
    }
}

/// Represents a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub department_type: DepartmentType,
    pub hod_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a department.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentRequest {
    #[validate(length(min = 1, max = 150, message = "Name must be 1-150 characters"))]
    pub name: String,

    #[validate(custom(function = "validate_department_code"))]
    pub code: String,

    pub department_type: DepartmentType,

    pub hod_id: Option<Uuid>,
}

/// Request payload for updating a department (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartmentRequest {
    #[validate(length(min = 1, max = 150, message = "Name must be 1-150 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_department_code"))]
    pub code: Option<String>,

    pub hod_id: Option<Uuid>,
}

/// Validate a department code: uppercase letters and digits, 2-10 characters.
fn validate_department_code(code: &str) -> Result<(), validator::ValidationError> {
    if CODE_REGEX.is_match(code) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("code_format").with_message(
            std::borrow::Cow::Borrowed("Code must be 2-10 uppercase letters or digits"),
        ))
    }
}

// Regex for department code validation
lazy_static::lazy_static! {
    pub static ref CODE_REGEX: regex::Regex = regex::Regex::new(r"^[A-Z0-9]{2,10}$").unwrap();
}

/// Response for listing departments.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDepartmentsResponse {
    pub departments: Vec<Department>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_type_round_trip() {
        assert_eq!(
            DepartmentType::parse("academic"),
            Some(DepartmentType::Academic)
        );
        assert_eq!(
            DepartmentType::parse("faculty"),
            Some(DepartmentType::Faculty)
        );
        assert_eq!(DepartmentType::parse("Academic"), None);
        assert_eq!(DepartmentType::parse(""), None);
    }

    #[test]
    fn test_department_type_serde() {
        let json = serde_json::to_string(&DepartmentType::Academic).unwrap();
        assert_eq!(json, "\"academic\"");

        let dt: DepartmentType = serde_json::from_str("\"faculty\"").unwrap();
        assert_eq!(dt, DepartmentType::Faculty);
    }

    #[test]
    fn test_create_request_validation() {
        use validator::Validate;

        let req = CreateDepartmentRequest {
            name: "Computer Science and Engineering".to_string(),
            code: "CSE".to_string(),
            department_type: DepartmentType::Academic,
            hod_id: None,
        };
        assert!(req.validate().is_ok());

        let short_code = CreateDepartmentRequest {
            code: "C".to_string(),
            ..req
        };
        assert!(short_code.validate().is_err());
    }

    #[test]
    fn test_code_regex() {
        assert!(CODE_REGEX.is_match("CSE"));
        assert!(CODE_REGEX.is_match("ECE2"));
        assert!(CODE_REGEX.is_match("IT"));
        assert!(!CODE_REGEX.is_match("cse")); // lowercase
        assert!(!CODE_REGEX.is_match("C")); // too short
        assert!(!CODE_REGEX.is_match("CSE-AI")); // punctuation
    }

    #[test]
    fn test_create_request_deserialization() {
        let json = r#"{
            "name": "Electronics",
            "code": "ECE",
            "departmentType": "academic"
        }"#;

        let req: CreateDepartmentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.code, "ECE");
        assert_eq!(req.department_type, DepartmentType::Academic);
        assert!(req.hod_id.is_none());
    }
}
