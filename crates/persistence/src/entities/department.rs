//! Department entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::department::{Department, DepartmentType};

/// Database row mapping for the departments table.
#[derive(Debug, Clone, FromRow)]
pub struct DepartmentEntity {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub department_type: String,
    pub hod_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DepartmentEntity> for Department {
    fn from(entity: DepartmentEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            code: entity.code,
            // CHECK constraint restricts the column to the known set
            department_type: DepartmentType::parse(&entity.department_type)
                .unwrap_or(DepartmentType::Academic),
            hod_id: entity.hod_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
