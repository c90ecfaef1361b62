//! Course and course assignment entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::course::{Course, CourseAssignment, CourseAssignmentDetail};

/// Database row mapping for the courses table.
#[derive(Debug, Clone, FromRow)]
pub struct CourseEntity {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub credits: i16,
    pub department_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<CourseEntity> for Course {
    fn from(entity: CourseEntity) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            name: entity.name,
            credits: entity.credits,
            department_id: entity.department_id,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the course_assignments table.
#[derive(Debug, Clone, FromRow)]
pub struct CourseAssignmentEntity {
    pub id: Uuid,
    pub course_id: Uuid,
    pub faculty_id: Uuid,
    pub batch_id: Uuid,
    pub semester: i16,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

impl From<CourseAssignmentEntity> for CourseAssignment {
    fn from(entity: CourseAssignmentEntity) -> Self {
        Self {
            id: entity.id,
            course_id: entity.course_id,
            faculty_id: entity.faculty_id,
            batch_id: entity.batch_id,
            semester: entity.semester,
            year: entity.year,
            created_at: entity.created_at,
        }
    }
}

/// Assignment row joined with course, faculty, and batch display fields.
#[derive(Debug, Clone, FromRow)]
pub struct CourseAssignmentDetailEntity {
    pub id: Uuid,
    pub course_id: Uuid,
    pub faculty_id: Uuid,
    pub batch_id: Uuid,
    pub semester: i16,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub course_code: String,
    pub course_name: String,
    pub faculty_name: String,
    pub batch_name: String,
}

impl From<CourseAssignmentDetailEntity> for CourseAssignmentDetail {
    fn from(entity: CourseAssignmentDetailEntity) -> Self {
        Self {
            assignment: CourseAssignment {
                id: entity.id,
                course_id: entity.course_id,
                faculty_id: entity.faculty_id,
                batch_id: entity.batch_id,
                semester: entity.semester,
                year: entity.year,
                created_at: entity.created_at,
            },
            course_code: entity.course_code,
            course_name: entity.course_name,
            faculty_name: entity.faculty_name,
            batch_name: entity.batch_name,
        }
    }
}
