//! Course and course assignment repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{CourseAssignmentDetailEntity, CourseAssignmentEntity, CourseEntity};
use crate::metrics::QueryTimer;

/// Repository for courses and faculty-batch assignments.
#[derive(Clone)]
pub struct CourseRepository {
    pool: PgPool,
}

impl CourseRepository {
    /// Creates a new CourseRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a course.
    pub async fn create(
        &self,
        code: &str,
        name: &str,
        credits: i16,
        department_id: Option<Uuid>,
    ) -> Result<CourseEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_course");
        let result = sqlx::query_as::<_, CourseEntity>(
            r#"
            INSERT INTO courses (code, name, credits, department_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(credits)
        .bind(department_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a course by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CourseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_course_by_id");
        let result = sqlx::query_as::<_, CourseEntity>(
            r#"
            SELECT * FROM courses WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List courses, optionally filtered by department, ordered by code.
    pub async fn list(&self, department_id: Option<Uuid>) -> Result<Vec<CourseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_courses");
        let result = sqlx::query_as::<_, CourseEntity>(
            r#"
            SELECT * FROM courses
            WHERE ($1::UUID IS NULL OR department_id = $1)
            ORDER BY code
            "#,
        )
        .bind(department_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a course. Returns the number of rows deleted.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_course");
        let result = sqlx::query(
            r#"
            DELETE FROM courses WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Assign a course to a faculty member for a batch and term.
    pub async fn create_assignment(
        &self,
        course_id: Uuid,
        faculty_id: Uuid,
        batch_id: Uuid,
        semester: i16,
        year: i32,
    ) -> Result<CourseAssignmentEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_course_assignment");
        let result = sqlx::query_as::<_, CourseAssignmentEntity>(
            r#"
            INSERT INTO course_assignments (course_id, faculty_id, batch_id, semester, year)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(course_id)
        .bind(faculty_id)
        .bind(batch_id)
        .bind(semester)
        .bind(year)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List assignments with course, faculty, and batch display fields,
    /// optionally filtered by faculty or batch.
    pub async fn list_assignments(
        &self,
        faculty_id: Option<Uuid>,
        batch_id: Option<Uuid>,
    ) -> Result<Vec<CourseAssignmentDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_course_assignments");
        let result = sqlx::query_as::<_, CourseAssignmentDetailEntity>(
            r#"
            SELECT
                ca.id, ca.course_id, ca.faculty_id, ca.batch_id,
                ca.semester, ca.year, ca.created_at,
                c.code AS course_code,
                c.name AS course_name,
                p.full_name AS faculty_name,
                b.name AS batch_name
            FROM course_assignments ca
            JOIN courses c ON c.id = ca.course_id
            JOIN profiles p ON p.user_id = ca.faculty_id
            JOIN batches b ON b.id = ca.batch_id
            WHERE ($1::UUID IS NULL OR ca.faculty_id = $1)
              AND ($2::UUID IS NULL OR ca.batch_id = $2)
            ORDER BY ca.year DESC, ca.semester DESC, c.code
            "#,
        )
        .bind(faculty_id)
        .bind(batch_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a course assignment.
    pub async fn delete_assignment(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_course_assignment");
        let result = sqlx::query(
            r#"
            DELETE FROM course_assignments WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
