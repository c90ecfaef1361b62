//! File upload domain model and storage buckets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage buckets known to the portal.
///
/// `images` and `profile-pictures` are public-read; the rest require a
/// signed download grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bucket {
    #[serde(rename = "documents")]
    Documents,
    #[serde(rename = "images")]
    Images,
    #[serde(rename = "assignments")]
    Assignments,
    #[serde(rename = "profile-pictures")]
    ProfilePictures,
}

/// All buckets, for provisioning storage directories at startup.
pub const ALL_BUCKETS: [Bucket; 4] = [
    Bucket::Documents,
    Bucket::Images,
    Bucket::Assignments,
    Bucket::ProfilePictures,
];

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Documents => "documents",
            Bucket::Images => "images",
            Bucket::Assignments => "assignments",
            Bucket::ProfilePictures => "profile-pictures",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "documents" => Some(Bucket::Documents),
            "images" => Some(Bucket::Images),
            "assignments" => Some(Bucket::Assignments),
            "profile-pictures" => Some(Bucket::ProfilePictures),
            _ => None,
        }
    }

    /// Public buckets serve objects without a signed grant.
    pub fn is_public(&self) -> bool {
        matches!(self, Bucket::Images | Bucket::ProfilePictures)
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata row for a stored object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpload {
    pub id: Uuid,
    /// Generated object name within the bucket.
    pub filename: String,
    /// Name the file had on the uploader's machine.
    pub original_name: String,
    /// Object key relative to the storage root: `{bucket}/{user_id}/{filename}`.
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub bucket: Bucket,
    pub category: Option<String>,
    pub related_id: Option<Uuid>,
    pub related_type: Option<String>,
    pub is_deleted: bool,
    pub uploaded_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Response payload for a completed upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadResponse {
    pub id: Uuid,
    pub filename: String,
    pub original_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub bucket: Bucket,
    pub url: String,
}

/// Result of a multi-file upload. Failures are reported per file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiUploadResponse {
    pub uploaded: Vec<FileUploadResponse>,
    pub failed: Vec<UploadFailure>,
}

/// One failed file from a multi-file upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFailure {
    pub original_name: String,
    pub reason: String,
}

/// A time-limited signed download grant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlResponse {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

/// Response for listing uploads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesResponse {
    pub files: Vec<FileUpload>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_round_trip() {
        for bucket in ALL_BUCKETS {
            assert_eq!(Bucket::parse(bucket.as_str()), Some(bucket));
        }
        assert_eq!(Bucket::parse("videos"), None);
        assert_eq!(Bucket::parse("Documents"), None);
    }

    #[test]
    fn test_public_buckets() {
        assert!(Bucket::Images.is_public());
        assert!(Bucket::ProfilePictures.is_public());
        assert!(!Bucket::Documents.is_public());
        assert!(!Bucket::Assignments.is_public());
    }

    #[test]
    fn test_bucket_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Bucket::ProfilePictures).unwrap();
        assert_eq!(json, "\"profile-pictures\"");

        let bucket: Bucket = serde_json::from_str("\"assignments\"").unwrap();
        assert_eq!(bucket, Bucket::Assignments);
    }
}
