use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::files::catalog;
use crate::features::files::dtos::{
    is_mime_type_allowed, DeleteFileResponseDto, FileListQueryDto, FileResponseDto, RenameFileDto,
    ShareLinkResponseDto, StorageUsageDto, UploadBatchResponseDto, UploadFailureDto,
    UploadFilesDto, ALLOWED_MIME_TYPES,
};
use crate::features::files::services::FileService;
use crate::shared::constants::MAX_FILE_SIZE;
use crate::shared::types::{ApiResponse, Meta};

/// List the account's files with filtering and sorting
///
/// The full catalog is fetched and the search/type/date filters and the
/// sort are applied in memory, so repeating the same query against an
/// unchanged catalog returns the same view.
#[utoipa::path(
    get,
    path = "/api/files",
    tag = "files",
    params(FileListQueryDto),
    responses(
        (status = 200, description = "Filtered and sorted file list", body = ApiResponse<Vec<FileResponseDto>>),
        (status = 400, description = "Invalid query parameter"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_files(
    user: AuthenticatedUser,
    State(service): State<Arc<FileService>>,
    Query(params): Query<FileListQueryDto>,
) -> Result<Json<ApiResponse<Vec<FileResponseDto>>>, AppError> {
    let query = params.into_query()?;
    let full_catalog = service.catalog(user.account_id).await?;
    let view = catalog::apply(&full_catalog, &query);

    let total = view.len() as i64;
    let files: Vec<FileResponseDto> = view.into_iter().map(FileResponseDto::from).collect();

    Ok(Json(ApiResponse::success(
        Some(files),
        None,
        Some(Meta { total }),
    )))
}

/// Upload one or more files
///
/// Accepts multipart/form-data with one or more `files` fields. Files are
/// processed in submission order and independently: a rejected or failed
/// file never aborts the rest of the batch, and the response reports each
/// outcome.
#[utoipa::path(
    post,
    path = "/api/files/upload",
    tag = "files",
    request_body(
        content = UploadFilesDto,
        content_type = "multipart/form-data",
        description = "Multi-file upload form",
    ),
    responses(
        (status = 201, description = "At least one file uploaded", body = ApiResponse<UploadBatchResponseDto>),
        (status = 400, description = "No file uploaded successfully", body = ApiResponse<UploadBatchResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 413, description = "Request body too large")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_files(
    user: AuthenticatedUser,
    State(service): State<Arc<FileService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadBatchResponseDto>>), AppError> {
    let mut uploaded: Vec<FileResponseDto> = Vec::new();
    let mut failed: Vec<UploadFailureDto> = Vec::new();
    let mut saw_file = false;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                // Files already uploaded stay reported; the broken stream
                // becomes one more failed entry instead of discarding the
                // batch outcome.
                debug!("Failed to read multipart field: {}", e);
                failed.push(UploadFailureDto {
                    file_name: "unnamed".to_string(),
                    reason: format!("Failed to read multipart data: {}", e),
                });
                break;
            }
        };
        let field_name = field.name().unwrap_or("").to_string();
        if field_name != "files" && field_name != "file" {
            debug!("Ignoring unknown field: {}", field_name);
            continue;
        }
        saw_file = true;

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unnamed".to_string());
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let data = match field.bytes().await {
            Ok(data) => data.to_vec(),
            Err(e) => {
                failed.push(UploadFailureDto {
                    file_name,
                    reason: format!("Failed to read file data: {}", e),
                });
                continue;
            }
        };

        // Size and type are checked before anything touches storage.
        if data.len() > MAX_FILE_SIZE {
            failed.push(UploadFailureDto {
                file_name,
                reason: format!(
                    "File too large. Maximum size is {} MB",
                    MAX_FILE_SIZE / 1024 / 1024
                ),
            });
            continue;
        }
        if !is_mime_type_allowed(&content_type) {
            failed.push(UploadFailureDto {
                file_name,
                reason: format!(
                    "File type '{}' is not allowed. Allowed types: {}",
                    content_type,
                    ALLOWED_MIME_TYPES.join(", ")
                ),
            });
            continue;
        }

        match service
            .upload(user.account_id, &file_name, &content_type, data)
            .await
        {
            Ok(file) => uploaded.push(FileResponseDto::from(file)),
            Err(e) => failed.push(UploadFailureDto {
                file_name,
                reason: e.to_string(),
            }),
        }
    }

    batch_response(uploaded, failed, saw_file)
}

/// Turn accumulated per-file outcomes into the batch response.
///
/// Every recorded outcome is always reported, even when the multipart
/// stream broke partway through the batch.
fn batch_response(
    uploaded: Vec<FileResponseDto>,
    failed: Vec<UploadFailureDto>,
    saw_file: bool,
) -> Result<(StatusCode, Json<ApiResponse<UploadBatchResponseDto>>), AppError> {
    if !saw_file && failed.is_empty() {
        return Err(AppError::BadRequest(
            "At least one file is required".to_string(),
        ));
    }

    let status = if uploaded.is_empty() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::CREATED
    };
    let message = format!("{} uploaded, {} failed", uploaded.len(), failed.len());

    Ok((
        status,
        Json(ApiResponse::success(
            Some(UploadBatchResponseDto { uploaded, failed }),
            Some(message),
            None,
        )),
    ))
}

/// Rename a file
///
/// Updates the display name, the object key, the URL and the type tag
/// together.
#[utoipa::path(
    patch,
    path = "/api/files/{id}/rename",
    tag = "files",
    params(
        ("id" = Uuid, Path, description = "File ID")
    ),
    request_body = RenameFileDto,
    responses(
        (status = 200, description = "File renamed", body = ApiResponse<FileResponseDto>),
        (status = 400, description = "Invalid name"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not the file's owner"),
        (status = 404, description = "File not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn rename_file(
    user: AuthenticatedUser,
    State(service): State<Arc<FileService>>,
    Path(id): Path<Uuid>,
    Json(dto): Json<RenameFileDto>,
) -> Result<Json<ApiResponse<FileResponseDto>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let file = service.rename(user.account_id, id, &dto.file_name).await?;

    Ok(Json(ApiResponse::success(
        Some(FileResponseDto::from(file)),
        Some("File renamed successfully".to_string()),
        None,
    )))
}

/// Delete a file
#[utoipa::path(
    delete,
    path = "/api/files/{id}",
    tag = "files",
    params(
        ("id" = Uuid, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File deleted", body = ApiResponse<DeleteFileResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not the file's owner"),
        (status = 404, description = "File not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_file(
    user: AuthenticatedUser,
    State(service): State<Arc<FileService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteFileResponseDto>>, AppError> {
    service.delete(user.account_id, id).await?;

    Ok(Json(ApiResponse::success(
        Some(DeleteFileResponseDto { deleted: true }),
        Some("File deleted successfully".to_string()),
        None,
    )))
}

/// Download a file
///
/// Streams the stored bytes back with an attachment disposition carrying
/// the display name, and bumps the file's download counter.
#[utoipa::path(
    get,
    path = "/api/files/{id}/download",
    tag = "files",
    params(
        ("id" = Uuid, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File content", content_type = "application/octet-stream"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not the file's owner"),
        (status = 404, description = "File not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn download_file(
    user: AuthenticatedUser,
    State(service): State<Arc<FileService>>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (file, data) = service.download(user.account_id, id).await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        file.file_name.replace('"', "")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    )
        .into_response())
}

/// Generate a time-limited share link for a file
#[utoipa::path(
    get,
    path = "/api/files/{id}/share",
    tag = "files",
    params(
        ("id" = Uuid, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "Presigned share link", body = ApiResponse<ShareLinkResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not the file's owner"),
        (status = 404, description = "File not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn share_file(
    user: AuthenticatedUser,
    State(service): State<Arc<FileService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ShareLinkResponseDto>>, AppError> {
    let (url, expires_in) = service.share(user.account_id, id).await?;

    Ok(Json(ApiResponse::success(
        Some(ShareLinkResponseDto { url, expires_in }),
        None,
        None,
    )))
}

/// Storage usage summary for the account
///
/// Computed over the full catalog, never over a filtered view.
#[utoipa::path(
    get,
    path = "/api/files/storage",
    tag = "files",
    responses(
        (status = 200, description = "Storage usage", body = ApiResponse<StorageUsageDto>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn storage_usage(
    user: AuthenticatedUser,
    State(service): State<Arc<FileService>>,
) -> Result<Json<ApiResponse<StorageUsageDto>>, AppError> {
    let full_catalog = service.catalog(user.account_id).await?;
    let usage = catalog::storage_usage(&full_catalog);

    Ok(Json(ApiResponse::success(
        Some(StorageUsageDto::from(usage)),
        None,
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::files::catalog::FileType;
    use chrono::Utc;

    fn uploaded_entry(name: &str) -> FileResponseDto {
        FileResponseDto {
            id: uuid::Uuid::new_v4(),
            file_name: name.to_string(),
            path: format!("owner/{}", name),
            url: format!("http://localhost:9000/uploads/owner/{}", name),
            size: 1,
            size_label: "1.00 B".to_string(),
            file_type: FileType::Other,
            download_count: 0,
            uploaded_at: Utc::now(),
        }
    }

    fn failed_entry(name: &str) -> UploadFailureDto {
        UploadFailureDto {
            file_name: name.to_string(),
            reason: "Failed to read multipart data: stream closed".to_string(),
        }
    }

    #[test]
    fn test_batch_keeps_partial_outcomes_after_stream_break() {
        let (status, Json(body)) = batch_response(
            vec![uploaded_entry("a.pdf"), uploaded_entry("b.pdf")],
            vec![failed_entry("unnamed")],
            true,
        )
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        let batch = body.data.unwrap();
        assert_eq!(batch.uploaded.len(), 2);
        assert_eq!(batch.failed.len(), 1);
    }

    #[test]
    fn test_batch_stream_break_before_any_file_is_reported() {
        let (status, Json(body)) =
            batch_response(Vec::new(), vec![failed_entry("unnamed")], false).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let batch = body.data.unwrap();
        assert!(batch.uploaded.is_empty());
        assert_eq!(batch.failed.len(), 1);
    }

    #[test]
    fn test_batch_all_rejected_is_bad_request() {
        let (status, _) =
            batch_response(Vec::new(), vec![failed_entry("virus.exe")], true).unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_batch_without_files_is_an_error() {
        assert!(batch_response(Vec::new(), Vec::new(), false).is_err());
    }
}
