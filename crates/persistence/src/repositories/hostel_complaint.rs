//! Hostel complaint repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::HostelComplaintEntity;
use crate::metrics::QueryTimer;

/// Repository for hostel maintenance complaints.
#[derive(Clone)]
pub struct HostelComplaintRepository {
    pool: PgPool,
}

impl HostelComplaintRepository {
    /// Creates a new HostelComplaintRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a complaint in the Pending state.
    pub async fn create(
        &self,
        student_id: Uuid,
        hostel_block: &str,
        room_number: &str,
        issue_type: &str,
        description: &str,
    ) -> Result<HostelComplaintEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_hostel_complaint");
        let result = sqlx::query_as::<_, HostelComplaintEntity>(
            r#"
            INSERT INTO hostel_complaints
                (student_id, hostel_block, room_number, issue_type, description, status)
            VALUES ($1, $2, $3, $4, $5, 'Pending')
            RETURNING *
            "#,
        )
        .bind(student_id)
        .bind(hostel_block)
        .bind(room_number)
        .bind(issue_type)
        .bind(description)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a complaint by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<HostelComplaintEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_hostel_complaint_by_id");
        let result = sqlx::query_as::<_, HostelComplaintEntity>(
            r#"
            SELECT * FROM hostel_complaints WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List every complaint, newest first. Warden and admin view.
    pub async fn list_all(
        &self,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<HostelComplaintEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_hostel_complaints");
        let result = sqlx::query_as::<_, HostelComplaintEntity>(
            r#"
            SELECT * FROM hostel_complaints
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a student's own complaints, newest first.
    pub async fn list_by_student(
        &self,
        student_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<HostelComplaintEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_hostel_complaints_by_student");
        let result = sqlx::query_as::<_, HostelComplaintEntity>(
            r#"
            SELECT * FROM hostel_complaints
            WHERE student_id = $1
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

    /// Update a complaint's status and warden remarks.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: &str,
        warden_remarks: Option<&str>,
    ) -> Result<Option<HostelComplaintEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_hostel_complaint_status");
        let result = sqlx::query_as::<_, HostelComplaintEntity>(
            r#"
            UPDATE hostel_complaints SET
                status = $2,
                warden_remarks = COALESCE($3, warden_remarks),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(warden_remarks)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Complaint counts grouped by status, for the summary report.
    pub async fn count_by_status(&self) -> Result<Vec<(String, i64)>, sqlx::Error> {
        let timer = QueryTimer::new("count_complaints_by_status");
        let result = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT status, COUNT(*) FROM hostel_complaints
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
