//! Local disk file storage.
//!
//! Files land under `{root}/{bucket}/{user_id}/{filename}`. Private
//! buckets are reachable only through HMAC-signed, expiring URLs.

use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use domain::models::file_upload::Bucket;
use shared::crypto::{sign_download, verify_download};

use crate::config::StorageConfig;
use crate::error::ApiError;

/// A file written to disk, ready for metadata insertion.
#[derive(Debug)]
pub struct StoredFile {
    pub filename: String,
    pub file_path: String,
    pub size: i64,
}

#[derive(Clone)]
pub struct StorageService {
    root: PathBuf,
    signing_secret: String,
    signed_url_expiry_secs: i64,
    public_base_url: String,
}

impl StorageService {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: PathBuf::from(&config.root),
            signing_secret: config.signing_secret.clone(),
            signed_url_expiry_secs: config.signed_url_expiry_secs,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Write uploaded bytes to disk.
    ///
    /// The stored filename is prefixed with a timestamp so repeated
    /// uploads of the same name never collide.
    pub async fn save(
        &self,
        bucket: Bucket,
        user_id: Uuid,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, ApiError> {
        let filename = format!(
            "{}_{}",
            Utc::now().timestamp_millis(),
            sanitize_filename(original_name)
        );
        let file_path = format!("{}/{}/{}", bucket.as_str(), user_id, filename);

        let dir = self.root.join(bucket.as_str()).join(user_id.to_string());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to create storage dir: {}", e)))?;

        tokio::fs::write(dir.join(&filename), bytes)
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to write file: {}", e)))?;

        Ok(StoredFile {
            filename,
            file_path,
            size: bytes.len() as i64,
        })
    }

    /// Open a stored file for streaming.
    pub async fn open(&self, file_path: &str) -> Result<tokio::fs::File, ApiError> {
        let path = self.resolve(file_path)?;
        tokio::fs::File::open(path)
            .await
            .map_err(|_| ApiError::NotFound("File not found".into()))
    }

    /// Remove a stored file's bytes. Missing files are not an error, the
    /// metadata row is the source of truth.
    pub async fn remove(&self, file_path: &str) -> Result<(), ApiError> {
        let path = self.resolve(file_path)?;
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Internal(format!("Failed to remove file: {}", e))),
        }
    }

    /// Build an unsigned download URL for a file in a public bucket.
    pub fn public_url(&self, file_path: &str) -> String {
        format!(
            "{}/api/v1/files/download?path={}",
            self.public_base_url, file_path
        )
    }

    /// Build a signed download URL for a stored file.
    /// Returns the URL and its expiry as a unix timestamp.
    pub fn signed_url(&self, file_path: &str) -> Result<(String, i64), ApiError> {
        let (bucket, object_key) = split_file_path(file_path)?;
        let expires = Utc::now().timestamp() + self.signed_url_expiry_secs;
        let signature = sign_download(&self.signing_secret, bucket, object_key, expires);
        let url = format!(
            "{}/api/v1/files/download?path={}&expires={}&sig={}",
            self.public_base_url, file_path, expires, signature
        );
        Ok((url, expires))
    }

    /// Verify a signed download request. Checks both the signature and
    /// the expiry timestamp.
    pub fn verify_signed(&self, file_path: &str, expires: i64, signature: &str) -> bool {
        if expires < Utc::now().timestamp() {
            return false;
        }
        match split_file_path(file_path) {
            Ok((bucket, object_key)) => {
                verify_download(&self.signing_secret, bucket, object_key, expires, signature)
            }
            Err(_) => false,
        }
    }

    /// Resolve a stored path to an absolute path, rejecting traversal.
    fn resolve(&self, file_path: &str) -> Result<PathBuf, ApiError> {
        let relative = Path::new(file_path);
        let traversal = relative
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)));
        if traversal {
            return Err(ApiError::Validation("Invalid file path".into()));
        }
        Ok(self.root.join(relative))
    }
}

/// Split a stored path into its bucket and object key.
fn split_file_path(file_path: &str) -> Result<(&str, &str), ApiError> {
    file_path
        .split_once('/')
        .filter(|(bucket, key)| Bucket::parse(bucket).is_some() && !key.is_empty())
        .ok_or_else(|| ApiError::Validation("Invalid file path".into()))
}

/// Keep filenames shell- and URL-safe. Anything outside a conservative
/// character set becomes an underscore.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> StorageService {
        StorageService {
            root: PathBuf::from("/tmp/storage-test"),
            signing_secret: "secret".to_string(),
            signed_url_expiry_secs: 900,
            public_base_url: "http://localhost:8080".to_string(),
        }
    }

    #[test]
    fn test_sanitize_filename_passthrough() {
        assert_eq!(sanitize_filename("report_v2.pdf"), "report_v2.pdf");
    }

    #[test]
    fn test_sanitize_filename_replaces_specials() {
        assert_eq!(sanitize_filename("my notes (1).pdf"), "my_notes__1_.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
    }

    #[test]
    fn test_sanitize_filename_empty() {
        assert_eq!(sanitize_filename(""), "file");
    }

    #[test]
    fn test_split_file_path() {
        let (bucket, key) = split_file_path("documents/abc/123_report.pdf").unwrap();
        assert_eq!(bucket, "documents");
        assert_eq!(key, "abc/123_report.pdf");
    }

    #[test]
    fn test_split_file_path_unknown_bucket() {
        assert!(split_file_path("secrets/abc/file.txt").is_err());
        assert!(split_file_path("no-slash").is_err());
    }

    #[test]
    fn test_signed_url_round_trip() {
        let service = test_service();
        let file_path = "documents/user/12345_notes.pdf";
        let (url, expires) = service.signed_url(file_path).unwrap();

        assert!(url.starts_with("http://localhost:8080/api/v1/files/download?"));
        assert!(url.contains(file_path));

        let sig = url.rsplit("sig=").next().unwrap();
        assert!(service.verify_signed(file_path, expires, sig));
    }

    #[test]
    fn test_signed_url_rejects_expired() {
        let service = test_service();
        let file_path = "documents/user/f.pdf";
        let expired = Utc::now().timestamp() - 10;
        let sig = sign_download("secret", "documents", "user/f.pdf", expired);
        assert!(!service.verify_signed(file_path, expired, &sig));
    }

    #[test]
    fn test_signed_url_rejects_tampered_path() {
        let service = test_service();
        let (url, expires) = service.signed_url("documents/user/a.pdf").unwrap();
        let sig = url.rsplit("sig=").next().unwrap();
        assert!(!service.verify_signed("documents/user/b.pdf", expires, sig));
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let service = test_service();
        assert!(service.resolve("documents/../../etc/passwd").is_err());
        assert!(service.resolve("documents/user/ok.pdf").is_ok());
    }
}
