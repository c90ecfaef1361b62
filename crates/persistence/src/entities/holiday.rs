//! Holiday entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::holiday::Holiday;

/// Database row mapping for the holidays table.
#[derive(Debug, Clone, FromRow)]
pub struct HolidayEntity {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub holiday_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<HolidayEntity> for Holiday {
    fn from(entity: HolidayEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            date: entity.date,
            holiday_type: entity.holiday_type,
            created_at: entity.created_at,
        }
    }
}
