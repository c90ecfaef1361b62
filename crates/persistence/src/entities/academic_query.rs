//! Academic query entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::academic_query::{AcademicQuery, QueryStatus};

/// Database row mapping for the academic_queries table.
#[derive(Debug, Clone, FromRow)]
pub struct AcademicQueryEntity {
    pub id: Uuid,
    pub query_id: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub student_id: Uuid,
    pub faculty_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AcademicQueryEntity> for AcademicQuery {
    fn from(entity: AcademicQueryEntity) -> Self {
        Self {
            id: entity.id,
            query_id: entity.query_id,
            subject: entity.subject,
            message: entity.message,
            // CHECK constraint restricts the column to the known set
            status: QueryStatus::parse(&entity.status).unwrap_or(QueryStatus::Open),
            student_id: entity.student_id,
            faculty_id: entity.faculty_id,
            parent_id: entity.parent_id,
            author_id: entity.author_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
