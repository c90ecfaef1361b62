//! Academic query repository for database operations.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AcademicQueryEntity;
use crate::metrics::QueryTimer;

/// Repository for academic query threads.
///
/// Root queries carry a human-readable query code and drive the status
/// lifecycle; replies are rows pointing at the root via parent_id.
#[derive(Clone)]
pub struct AcademicQueryRepository {
    pool: PgPool,
}

impl AcademicQueryRepository {
    /// Creates a new AcademicQueryRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a root query with a freshly generated query code.
    ///
    /// The serial comes from a per-insert count of this year's roots, so
    /// codes are sequential per calendar year.
    pub async fn create_root(
        &self,
        query_id: &str,
        subject: &str,
        message: &str,
        student_id: Uuid,
        faculty_id: Option<Uuid>,
    ) -> Result<AcademicQueryEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_academic_query");
        let result = sqlx::query_as::<_, AcademicQueryEntity>(
            r#"
            INSERT INTO academic_queries
                (query_id, subject, message, status, student_id, faculty_id, author_id)
            VALUES ($1, $2, $3, 'Open', $4, $5, $4)
            RETURNING *
            "#,
        )
        .bind(query_id)
        .bind(subject)
        .bind(message)
        .bind(student_id)
        .bind(faculty_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count root queries created in the given calendar year, for query
    /// code generation.
    pub async fn count_roots_for_year(&self, year: i32) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_queries_for_year");
        let result = sqlx::query_as::<_, (i64,)>(
            r#"
            SELECT COUNT(*) FROM academic_queries
            WHERE parent_id IS NULL
              AND EXTRACT(YEAR FROM created_at)::INT = $1
            "#,
        )
        .bind(year)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(result.0)
    }

    /// Find a query row (root or reply) by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AcademicQueryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_academic_query_by_id");
        let result = sqlx::query_as::<_, AcademicQueryEntity>(
            r#"
            SELECT * FROM academic_queries WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List root queries a student raised, newest first.
    pub async fn list_roots_for_student(
        &self,
        student_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AcademicQueryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_queries_for_student");
        let result = sqlx::query_as::<_, AcademicQueryEntity>(
            r#"
            SELECT * FROM academic_queries
            WHERE parent_id IS NULL AND student_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(student_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List root queries addressed to a faculty member, newest first.
    pub async fn list_roots_for_faculty(
        &self,
        faculty_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AcademicQueryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_queries_for_faculty");
        let result = sqlx::query_as::<_, AcademicQueryEntity>(
            r#"
            SELECT * FROM academic_queries
            WHERE parent_id IS NULL AND faculty_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(faculty_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List every root query, newest first. Admin view.
    pub async fn list_all_roots(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AcademicQueryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_queries");
        let result = sqlx::query_as::<_, AcademicQueryEntity>(
            r#"
            SELECT * FROM academic_queries
            WHERE parent_id IS NULL
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Fetch the replies of several roots in one query, grouped by root.
    pub async fn find_replies_for_roots(
        &self,
        root_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<AcademicQueryEntity>>, sqlx::Error> {
        let timer = QueryTimer::new("find_replies_for_roots");
        let rows = sqlx::query_as::<_, AcademicQueryEntity>(
            r#"
            SELECT * FROM academic_queries
            WHERE parent_id = ANY($1)
            ORDER BY created_at
            "#,
        )
        .bind(root_ids)
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        let mut grouped: HashMap<Uuid, Vec<AcademicQueryEntity>> = HashMap::new();
        for row in rows {
            if let Some(parent_id) = row.parent_id {
                grouped.entry(parent_id).or_default().push(row);
            }
        }
        Ok(grouped)
    }

    /// Insert a reply and move the root to the given status, atomically.
    pub async fn add_reply(
        &self,
        parent_id: Uuid,
        message: &str,
        author_id: Uuid,
        student_id: Uuid,
        faculty_id: Option<Uuid>,
        new_status: &str,
    ) -> Result<AcademicQueryEntity, sqlx::Error> {
        let timer = QueryTimer::new("add_query_reply");

        let mut tx = self.pool.begin().await?;

        let reply = sqlx::query_as::<_, AcademicQueryEntity>(
            r#"
            INSERT INTO academic_queries
                (subject, message, status, student_id, faculty_id, parent_id, author_id)
            VALUES ('', $2, $6, $4, $5, $1, $3)
            RETURNING *
            "#,
        )
        .bind(parent_id)
        .bind(message)
        .bind(author_id)
        .bind(student_id)
        .bind(faculty_id)
        .bind(new_status)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE academic_queries SET status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(parent_id)
        .bind(new_status)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(reply)
    }

    /// Mark a root query Resolved. Returns the updated root if it existed.
    pub async fn resolve(&self, id: Uuid) -> Result<Option<AcademicQueryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("resolve_academic_query");
        let result = sqlx::query_as::<_, AcademicQueryEntity>(
            r#"
            UPDATE academic_queries SET status = 'Resolved', updated_at = NOW()
            WHERE id = $1 AND parent_id IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Root query counts grouped by status, for the summary report.
    pub async fn count_by_status(&self) -> Result<Vec<(String, i64)>, sqlx::Error> {
        let timer = QueryTimer::new("count_queries_by_status");
        let result = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT status, COUNT(*) FROM academic_queries
            WHERE parent_id IS NULL
            GROUP BY status
            ORDER BY status
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
