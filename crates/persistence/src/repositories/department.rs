//! Department repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::DepartmentEntity;
use crate::metrics::QueryTimer;

/// Repository for academic and faculty departments.
#[derive(Clone)]
pub struct DepartmentRepository {
    pool: PgPool,
}

impl DepartmentRepository {
    /// Creates a new DepartmentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a department.
    pub async fn create(
        &self,
        name: &str,
        code: &str,
        department_type: &str,
        hod_id: Option<Uuid>,
    ) -> Result<DepartmentEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_department");
        let result = sqlx::query_as::<_, DepartmentEntity>(
            r#"
            INSERT INTO departments (name, code, department_type, hod_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(code)
        .bind(department_type)
        .bind(hod_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a department by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<DepartmentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_department_by_id");
        let result = sqlx::query_as::<_, DepartmentEntity>(
            r#"
            SELECT * FROM departments WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List departments, optionally filtered by type, ordered by name.
    pub async fn list(
        &self,
        department_type: Option<&str>,
    ) -> Result<Vec<DepartmentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_departments");
        let result = sqlx::query_as::<_, DepartmentEntity>(
            r#"
            SELECT * FROM departments
            WHERE ($1::TEXT IS NULL OR department_type = $1)
            ORDER BY name
            "#,
        )
        .bind(department_type)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partial update of a department.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        code: Option<&str>,
        hod_id: Option<Uuid>,
    ) -> Result<Option<DepartmentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_department");
        let result = sqlx::query_as::<_, DepartmentEntity>(
            r#"
            UPDATE departments SET
                name = COALESCE($2, name),
                code = COALESCE($3, code),
                hod_id = COALESCE($4, hod_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(code)
        .bind(hod_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a department. Returns the number of rows deleted.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_department");
        let result = sqlx::query(
            r#"
            DELETE FROM departments WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
