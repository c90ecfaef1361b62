//! Timetable repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::TimetableEntryEntity;
use crate::metrics::QueryTimer;

/// Repository for weekly timetable entries.
#[derive(Clone)]
pub struct TimetableRepository {
    pool: PgPool,
}

impl TimetableRepository {
    /// Creates a new TimetableRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a timetable entry.
    pub async fn create(
        &self,
        batch_id: Uuid,
        day_of_week: i16,
        time_slot: &str,
        subject: &str,
        room: Option<&str>,
        faculty_id: Option<Uuid>,
    ) -> Result<TimetableEntryEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_timetable_entry");
        let result = sqlx::query_as::<_, TimetableEntryEntity>(
            r#"
            INSERT INTO timetable_entries (batch_id, day_of_week, time_slot, subject, room, faculty_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(batch_id)
        .bind(day_of_week)
        .bind(time_slot)
        .bind(subject)
        .bind(room)
        .bind(faculty_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an entry by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TimetableEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_timetable_entry_by_id");
        let result = sqlx::query_as::<_, TimetableEntryEntity>(
            r#"
            SELECT * FROM timetable_entries WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a batch's entries, ordered by day then slot.
    pub async fn list_for_batch(
        &self,
        batch_id: Uuid,
        day_of_week: Option<i16>,
    ) -> Result<Vec<TimetableEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_timetable_for_batch");
        let result = sqlx::query_as::<_, TimetableEntryEntity>(
            r#"
            SELECT * FROM timetable_entries
            WHERE batch_id = $1
              AND ($2::SMALLINT IS NULL OR day_of_week = $2)
            ORDER BY day_of_week, time_slot
            "#,
        )
        .bind(batch_id)
        .bind(day_of_week)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a faculty member's teaching slots, ordered by day then slot.
    pub async fn list_for_faculty(
        &self,
        faculty_id: Uuid,
    ) -> Result<Vec<TimetableEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_timetable_for_faculty");
        let result = sqlx::query_as::<_, TimetableEntryEntity>(
            r#"
            SELECT * FROM timetable_entries
            WHERE faculty_id = $1
            ORDER BY day_of_week, time_slot
            "#,
        )
        .bind(faculty_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partial update of an entry.
    pub async fn update(
        &self,
        id: Uuid,
        day_of_week: Option<i16>,
        time_slot: Option<&str>,
        subject: Option<&str>,
        room: Option<&str>,
        faculty_id: Option<Uuid>,
    ) -> Result<Option<TimetableEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_timetable_entry");
        let result = sqlx::query_as::<_, TimetableEntryEntity>(
            r#"
            UPDATE timetable_entries SET
                day_of_week = COALESCE($2, day_of_week),
                time_slot = COALESCE($3, time_slot),
                subject = COALESCE($4, subject),
                room = COALESCE($5, room),
                faculty_id = COALESCE($6, faculty_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(day_of_week)
        .bind(time_slot)
        .bind(subject)
        .bind(room)
        .bind(faculty_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an entry. Returns the number of rows deleted.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_timetable_entry");
        let result = sqlx::query(
            r#"
            DELETE FROM timetable_entries WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
