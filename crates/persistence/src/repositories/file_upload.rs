//! File upload metadata repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::FileUploadEntity;
use crate::metrics::QueryTimer;

/// Repository for uploaded file metadata. The bytes live on disk; rows
/// here are soft-deleted so the audit trail survives removal.
#[derive(Clone)]
pub struct FileUploadRepository {
    pool: PgPool,
}

impl FileUploadRepository {
    /// Creates a new FileUploadRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an uploaded file.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        &self,
        filename: &str,
        original_name: &str,
        file_path: &str,
        file_size: i64,
        mime_type: &str,
        bucket_name: &str,
        category: Option<&str>,
        related_id: Option<Uuid>,
        related_type: Option<&str>,
        uploaded_by: Uuid,
    ) -> Result<FileUploadEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_file_upload");
        let result = sqlx::query_as::<_, FileUploadEntity>(
            r#"
            INSERT INTO file_uploads
                (filename, original_name, file_path, file_size, mime_type,
                 bucket_name, category, related_id, related_type, uploaded_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(filename)
        .bind(original_name)
        .bind(file_path)
        .bind(file_size)
        .bind(mime_type)
        .bind(bucket_name)
        .bind(category)
        .bind(related_id)
        .bind(related_type)
        .bind(uploaded_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a live (not soft-deleted) file by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<FileUploadEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_file_upload_by_id");
        let result = sqlx::query_as::<_, FileUploadEntity>(
            r#"
            SELECT * FROM file_uploads WHERE id = $1 AND NOT is_deleted
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a user's live files, optionally within one bucket, newest first.
    pub async fn list_by_user(
        &self,
        uploaded_by: Uuid,
        bucket_name: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FileUploadEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_file_uploads_by_user");
        let result = sqlx::query_as::<_, FileUploadEntity>(
            r#"
            SELECT * FROM file_uploads
            WHERE uploaded_by = $1
              AND NOT is_deleted
              AND ($2::TEXT IS NULL OR bucket_name = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(uploaded_by)
        .bind(bucket_name)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Soft-delete a file the given user uploaded.
    /// Returns the row as it was, so the caller can remove the bytes.
    pub async fn soft_delete(
        &self,
        id: Uuid,
        uploaded_by: Uuid,
    ) -> Result<Option<FileUploadEntity>, sqlx::Error> {
        let timer = QueryTimer::new("soft_delete_file_upload");
        let result = sqlx::query_as::<_, FileUploadEntity>(
            r#"
            UPDATE file_uploads SET is_deleted = TRUE
            WHERE id = $1 AND uploaded_by = $2 AND NOT is_deleted
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(uploaded_by)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Remove a metadata row outright. Compensation for a failed upload,
    /// where no bytes ever landed on disk.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_file_upload");
        let result = sqlx::query(
            r#"
            DELETE FROM file_uploads WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
