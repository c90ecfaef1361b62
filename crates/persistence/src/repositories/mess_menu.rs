//! Mess menu repository for database operations.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::MessMenuEntity;
use crate::metrics::QueryTimer;

/// Repository for daily mess menus.
#[derive(Clone)]
pub struct MessMenuRepository {
    pool: PgPool,
}

impl MessMenuRepository {
    /// Creates a new MessMenuRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a menu, replacing any existing one for the same date and meal.
    pub async fn upsert(
        &self,
        menu_date: NaiveDate,
        meal_type: &str,
        items: &[String],
        created_by: Uuid,
    ) -> Result<MessMenuEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_mess_menu");
        let result = sqlx::query_as::<_, MessMenuEntity>(
            r#"
            INSERT INTO mess_menus (menu_date, meal_type, items, created_by)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (menu_date, meal_type)
            DO UPDATE SET items = EXCLUDED.items,
                          created_by = EXCLUDED.created_by,
                          updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(menu_date)
        .bind(meal_type)
        .bind(items)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a menu by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MessMenuEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_mess_menu_by_id");
        let result = sqlx::query_as::<_, MessMenuEntity>(
            r#"
            SELECT * FROM mess_menus WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List menus in a date range, chronologically then by meal.
    pub async fn list(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<MessMenuEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_mess_menus");
        let result = sqlx::query_as::<_, MessMenuEntity>(
            r#"
            SELECT * FROM mess_menus
            WHERE ($1::DATE IS NULL OR menu_date >= $1)
              AND ($2::DATE IS NULL OR menu_date <= $2)
            ORDER BY menu_date,
                CASE meal_type
                    WHEN 'Breakfast' THEN 0
                    WHEN 'Lunch' THEN 1
                    ELSE 2
                END
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replace the items of a menu.
    pub async fn update_items(
        &self,
        id: Uuid,
        items: &[String],
    ) -> Result<Option<MessMenuEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_mess_menu_items");
        let result = sqlx::query_as::<_, MessMenuEntity>(
            r#"
            UPDATE mess_menus SET items = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(items)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a menu. Returns the number of rows deleted.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_mess_menu");
        let result = sqlx::query(
            r#"
            DELETE FROM mess_menus WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
