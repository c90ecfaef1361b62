//! Batch and section entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::batch::{Batch, Section};

/// Database row mapping for the batches table.
#[derive(Debug, Clone, FromRow)]
pub struct BatchEntity {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub department_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<BatchEntity> for Batch {
    fn from(entity: BatchEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            year: entity.year,
            department_id: entity.department_id,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the sections table.
#[derive(Debug, Clone, FromRow)]
pub struct SectionEntity {
    pub id: Uuid,
    pub name: String,
    pub batch_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<SectionEntity> for Section {
    fn from(entity: SectionEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            batch_id: entity.batch_id,
            created_at: entity.created_at,
        }
    }
}
