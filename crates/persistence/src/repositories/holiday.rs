//! Holiday repository for database operations.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::HolidayEntity;
use crate::metrics::QueryTimer;

/// Repository for the academic holiday calendar.
#[derive(Clone)]
pub struct HolidayRepository {
    pool: PgPool,
}

impl HolidayRepository {
    /// Creates a new HolidayRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a holiday.
    pub async fn create(
        &self,
        name: &str,
        date: NaiveDate,
        holiday_type: &str,
    ) -> Result<HolidayEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_holiday");
        let result = sqlx::query_as::<_, HolidayEntity>(
            r#"
            INSERT INTO holidays (name, date, holiday_type)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(date)
        .bind(holiday_type)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List holidays in a date range, chronologically.
    pub async fn list(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<HolidayEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_holidays");
        let result = sqlx::query_as::<_, HolidayEntity>(
            r#"
            SELECT * FROM holidays
            WHERE ($1::DATE IS NULL OR date >= $1)
              AND ($2::DATE IS NULL OR date <= $2)
            ORDER BY date
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a holiday. Returns the number of rows deleted.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_holiday");
        let result = sqlx::query(
            r#"
            DELETE FROM holidays WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
