//! Timetable entry entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::timetable::TimetableEntry;

/// Database row mapping for the timetable_entries table.
#[derive(Debug, Clone, FromRow)]
pub struct TimetableEntryEntity {
    pub id: Uuid,
    pub batch_id: Uuid,
    pub day_of_week: i16,
    pub time_slot: String,
    pub subject: String,
    pub room: Option<String>,
    pub faculty_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<TimetableEntryEntity> for TimetableEntry {
    fn from(entity: TimetableEntryEntity) -> Self {
        Self {
            id: entity.id,
            batch_id: entity.batch_id,
            day_of_week: entity.day_of_week,
            time_slot: entity.time_slot,
            subject: entity.subject,
            room: entity.room,
            faculty_id: entity.faculty_id,
            created_at: entity.created_at,
        }
    }
}
