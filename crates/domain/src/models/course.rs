//! Course and course assignment domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A course in the catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub credits: i16,
    pub department_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Assignment of a course to a faculty member for a batch and semester.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseAssignment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub faculty_id: Uuid,
    pub batch_id: Uuid,
    pub semester: i16,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

/// A course assignment with display fields joined in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseAssignmentDetail {
    #[serde(flatten)]
    pub assignment: CourseAssignment,
    pub course_code: String,
    pub course_name: String,
    pub faculty_name: String,
    pub batch_name: String,
}

/// Request payload for creating a course.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(length(min = 2, max = 12, message = "Code must be 2-12 characters"))]
    pub code: String,

    #[validate(length(min = 1, max = 150, message = "Name must be 1-150 characters"))]
    pub name: String,

    #[validate(custom(function = "shared::validation::validate_credits"))]
    pub credits: i16,

    pub department_id: Option<Uuid>,
}

/// Request payload for assigning a course.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseAssignmentRequest {
    pub course_id: Uuid,
    pub faculty_id: Uuid,
    pub batch_id: Uuid,

    #[validate(custom(function = "shared::validation::validate_semester"))]
    pub semester: i16,

    #[validate(custom(function = "shared::validation::validate_academic_year"))]
    pub year: i32,
}
