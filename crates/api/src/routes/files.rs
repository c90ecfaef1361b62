//! File upload and download endpoints.
//!
//! Uploads are multipart and may carry several files; each file succeeds
//! or fails on its own. Files in public buckets download with a plain
//! URL, private buckets require an HMAC-signed expiring link.

use axum::{
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use domain::models::file_upload::{
    Bucket, FileUpload, FileUploadResponse, ListFilesResponse, MultiUploadResponse,
    SignedUrlResponse, UploadFailure,
};
use persistence::entities::FileUploadEntity;
use persistence::repositories::FileUploadRepository;
use shared::pagination::PageParams;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_file_uploaded;
use crate::middleware::role_gate::CurrentUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    pub category: Option<String>,
    pub related_id: Option<Uuid>,
    pub related_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListFilesQuery {
    pub bucket: Option<Bucket>,
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub path: String,
    pub expires: Option<i64>,
    pub sig: Option<String>,
}

/// POST /api/v1/files/upload/:bucket
///
/// Multipart upload into a bucket. In a multi-file batch, oversized or
/// unsaveable files land in the `failed` list without sinking the rest;
/// a batch where nothing was stored is rejected outright (413 when every
/// file was oversize, 400 otherwise).
pub async fn upload(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(bucket): Path<String>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MultiUploadResponse>), ApiError> {
    let bucket = Bucket::parse(&bucket)
        .ok_or_else(|| ApiError::Validation(format!("Unknown bucket '{}'", bucket)))?;

    let max_bytes = state.config.max_upload_bytes();
    let repo = FileUploadRepository::new(state.pool.clone());

    let mut uploaded = Vec::new();
    let mut failed = Vec::new();
    let mut oversize = 0;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid multipart body: {}", e)))?
    {
        let Some(original_name) = field.file_name().map(|s| s.to_string()) else {
            // Non-file form fields are ignored.
            continue;
        };

        let content_type = field.content_type().map(|s| s.to_string());
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                failed.push(UploadFailure {
                    original_name,
                    reason: format!("Failed to read upload: {}", e),
                });
                continue;
            }
        };

        if bytes.len() as u64 > max_bytes {
            oversize += 1;
            failed.push(UploadFailure {
                original_name,
                reason: format!(
                    "File exceeds the {} MB upload limit",
                    state.config.storage.max_upload_mb
                ),
            });
            continue;
        }

        let stored = match state
            .storage
            .save(bucket, user.user_id, &original_name, &bytes)
            .await
        {
            Ok(stored) => stored,
            Err(e) => {
                failed.push(UploadFailure {
                    original_name,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let mime_type = content_type.unwrap_or_else(|| {
            mime_guess::from_path(&original_name)
                .first_or_octet_stream()
                .to_string()
        });

        match repo
            .insert(
                &stored.filename,
                &original_name,
                &stored.file_path,
                stored.size,
                &mime_type,
                bucket.as_str(),
                query.category.as_deref(),
                query.related_id,
                query.related_type.as_deref(),
                user.user_id,
            )
            .await
        {
            Ok(entity) => {
                record_file_uploaded(bucket.as_str(), stored.size as u64);
                let file: FileUpload = entity.into();
                let url = download_url(&state, &file)?;
                uploaded.push(FileUploadResponse {
                    id: file.id,
                    filename: file.filename,
                    original_name: file.original_name,
                    file_size: file.file_size,
                    mime_type: file.mime_type,
                    bucket: file.bucket,
                    url,
                });
            }
            Err(e) => {
                // The bytes are on disk but the metadata insert failed;
                // remove them so nothing is orphaned.
                if let Err(cleanup) = state.storage.remove(&stored.file_path).await {
                    tracing::warn!("Failed to clean up after metadata error: {}", cleanup);
                }
                failed.push(UploadFailure {
                    original_name,
                    reason: ApiError::from(e).to_string(),
                });
            }
        }
    }

    if uploaded.is_empty() {
        if failed.is_empty() {
            return Err(ApiError::Validation("No file provided".into()));
        }
        if oversize == failed.len() {
            return Err(ApiError::PayloadTooLarge(format!(
                "File exceeds the {} MB upload limit",
                state.config.storage.max_upload_mb
            )));
        }
        return Err(ApiError::Validation(failed[0].reason.clone()));
    }

    state.activity.log(
        user.user_id,
        "file.uploaded",
        Some("file_upload"),
        None,
        Some(serde_json::json!({
            "bucket": bucket.as_str(),
            "count": uploaded.len()
        })),
    );

    Ok((StatusCode::CREATED, Json(MultiUploadResponse { uploaded, failed })))
}

/// GET /api/v1/files
///
/// The caller's own uploads, optionally limited to one bucket.
pub async fn list_files(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListFilesQuery>,
    Query(page): Query<PageParams>,
) -> Result<Json<ListFilesResponse>, ApiError> {
    let repo = FileUploadRepository::new(state.pool.clone());
    let files: Vec<FileUpload> = repo
        .list_by_user(
            user.user_id,
            query.bucket.map(|b| b.as_str()),
            page.limit(),
            page.offset(),
        )
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = files.len();

    Ok(Json(ListFilesResponse { files, total }))
}

/// GET /api/v1/files/:id/url
///
/// A download URL for one file: unsigned for public buckets, signed and
/// expiring for private ones. Owner only.
pub async fn file_url(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<SignedUrlResponse>, ApiError> {
    let file = load_owned_or_public(&state, &user, id).await?;

    if file.bucket.is_public() {
        Ok(Json(SignedUrlResponse {
            url: state.storage.public_url(&file.file_path),
            expires_at: DateTime::<Utc>::MAX_UTC,
        }))
    } else {
        let (url, expires) = state.storage.signed_url(&file.file_path)?;
        let expires_at = DateTime::<Utc>::from_timestamp(expires, 0)
            .ok_or_else(|| ApiError::Internal("Invalid expiry timestamp".into()))?;
        Ok(Json(SignedUrlResponse { url, expires_at }))
    }
}

/// GET /api/v1/files/:id/content
///
/// Streams a file the caller owns (or any file in a public bucket).
pub async fn download_by_id(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let file = load_owned_or_public(&state, &user, id).await?;
    stream_file(&state, &file.file_path, &file.mime_type, &file.original_name).await
}

/// GET /api/v1/files/download?path=...&expires=...&sig=...
///
/// Unauthenticated download endpoint. Public buckets are served as-is;
/// private buckets need a valid, unexpired signature.
pub async fn download_signed(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let bucket_name = query
        .path
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string();
    let bucket = Bucket::parse(&bucket_name)
        .ok_or_else(|| ApiError::Validation("Invalid file path".into()))?;

    if !bucket.is_public() {
        let (Some(expires), Some(sig)) = (query.expires, query.sig.as_deref()) else {
            return Err(ApiError::Unauthorized("Signed URL required".into()));
        };
        if !state.storage.verify_signed(&query.path, expires, sig) {
            return Err(ApiError::Unauthorized(
                "Invalid or expired download link".into(),
            ));
        }
    }

    let filename = query.path.rsplit('/').next().unwrap_or("file").to_string();
    let mime_type = mime_guess::from_path(&filename)
        .first_or_octet_stream()
        .to_string();
    stream_file(&state, &query.path, &mime_type, &filename).await
}

/// DELETE /api/v1/files/:id
///
/// Soft-deletes the metadata row, then removes the bytes.
pub async fn delete_file(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = FileUploadRepository::new(state.pool.clone());
    let entity = repo
        .soft_delete(id, user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("File not found".into()))?;

    state.storage.remove(&entity.file_path).await?;

    state.activity.log(
        user.user_id,
        "file.deleted",
        Some("file_upload"),
        Some(id.to_string()),
        None,
    );

    Ok(StatusCode::NO_CONTENT)
}

async fn load_owned_or_public(
    state: &AppState,
    user: &CurrentUser,
    id: Uuid,
) -> Result<FileUpload, ApiError> {
    let repo = FileUploadRepository::new(state.pool.clone());
    let entity: FileUploadEntity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("File not found".into()))?;
    let file: FileUpload = entity.into();

    if file.uploaded_by != user.user_id && !file.bucket.is_public() {
        return Err(ApiError::AccessDenied);
    }
    Ok(file)
}

fn download_url(state: &AppState, file: &FileUpload) -> Result<String, ApiError> {
    if file.bucket.is_public() {
        Ok(state.storage.public_url(&file.file_path))
    } else {
        let (url, _) = state.storage.signed_url(&file.file_path)?;
        Ok(url)
    }
}

async fn stream_file(
    state: &AppState,
    file_path: &str,
    mime_type: &str,
    filename: &str,
) -> Result<Response, ApiError> {
    let file = state.storage.open(file_path).await?;
    let stream = ReaderStream::new(file);
    let body = Body::from_stream(stream);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(mime_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    Ok((headers, body).into_response())
}
