//! Batch and section repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{BatchEntity, SectionEntity};
use crate::metrics::QueryTimer;

/// Repository for student batches and their sections.
#[derive(Clone)]
pub struct BatchRepository {
    pool: PgPool,
}

impl BatchRepository {
    /// Creates a new BatchRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a batch.
    pub async fn create(
        &self,
        name: &str,
        year: i32,
        department_id: Option<Uuid>,
    ) -> Result<BatchEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_batch");
        let result = sqlx::query_as::<_, BatchEntity>(
            r#"
            INSERT INTO batches (name, year, department_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(year)
        .bind(department_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a batch by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BatchEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_batch_by_id");
        let result = sqlx::query_as::<_, BatchEntity>(
            r#"
            SELECT * FROM batches WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all batches, newest intake year first.
    pub async fn list(&self) -> Result<Vec<BatchEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_batches");
        let result = sqlx::query_as::<_, BatchEntity>(
            r#"
            SELECT * FROM batches ORDER BY year DESC, name
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partial update of a batch.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        year: Option<i32>,
        department_id: Option<Uuid>,
    ) -> Result<Option<BatchEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_batch");
        let result = sqlx::query_as::<_, BatchEntity>(
            r#"
            UPDATE batches SET
                name = COALESCE($2, name),
                year = COALESCE($3, year),
                department_id = COALESCE($4, department_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(year)
        .bind(department_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a batch and, via cascade, its sections.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_batch");
        let result = sqlx::query(
            r#"
            DELETE FROM batches WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Insert a section under a batch.
    pub async fn create_section(
        &self,
        batch_id: Uuid,
        name: &str,
    ) -> Result<SectionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_section");
        let result = sqlx::query_as::<_, SectionEntity>(
            r#"
            INSERT INTO sections (batch_id, name)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(batch_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List the sections of a batch.
    pub async fn list_sections(&self, batch_id: Uuid) -> Result<Vec<SectionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_sections");
        let result = sqlx::query_as::<_, SectionEntity>(
            r#"
            SELECT * FROM sections WHERE batch_id = $1 ORDER BY name
            "#,
        )
        .bind(batch_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a section.
    pub async fn delete_section(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_section");
        let result = sqlx::query(
            r#"
            DELETE FROM sections WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
