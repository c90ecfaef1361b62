//! File upload entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::file_upload::{Bucket, FileUpload};

/// Database row mapping for the file_uploads table.
#[derive(Debug, Clone, FromRow)]
pub struct FileUploadEntity {
    pub id: Uuid,
    pub filename: String,
    pub original_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub bucket_name: String,
    pub category: Option<String>,
    pub related_id: Option<Uuid>,
    pub related_type: Option<String>,
    pub is_deleted: bool,
    pub uploaded_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<FileUploadEntity> for FileUpload {
    fn from(entity: FileUploadEntity) -> Self {
        Self {
            id: entity.id,
            filename: entity.filename,
            original_name: entity.original_name,
            file_path: entity.file_path,
            file_size: entity.file_size,
            mime_type: entity.mime_type,
            // CHECK constraint restricts the column to the known set
            bucket: Bucket::parse(&entity.bucket_name).unwrap_or(Bucket::Documents),
            category: entity.category,
            related_id: entity.related_id,
            related_type: entity.related_type,
            is_deleted: entity.is_deleted,
            uploaded_by: entity.uploaded_by,
            created_at: entity.created_at,
        }
    }
}
