use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::files::catalog::{
    format_size, CatalogEntry, FileQuery, FileType, SortKey, SortOrder, StorageUsage, TypeFilter,
};
use crate::features::files::models::File;

/// Upload request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFilesDto {
    /// One or more files to upload, each in a `files` field
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub files: String,
}

/// Response DTO for a single catalog entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileResponseDto {
    pub id: Uuid,
    pub file_name: String,
    /// Object key in the storage backend
    pub path: String,
    pub url: String,
    /// Size in bytes
    pub size: i64,
    /// Human-readable size, e.g. "1.50 MB"
    pub size_label: String,
    pub file_type: FileType,
    pub download_count: i64,
    pub uploaded_at: DateTime<Utc>,
}

impl From<CatalogEntry> for FileResponseDto {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            size_label: format_size(entry.size),
            id: entry.id,
            file_name: entry.file_name,
            path: entry.path,
            url: entry.url,
            size: entry.size,
            file_type: entry.file_type,
            download_count: entry.download_count,
            uploaded_at: entry.uploaded_at,
        }
    }
}

impl From<File> for FileResponseDto {
    fn from(file: File) -> Self {
        Self {
            size_label: format_size(file.size),
            file_type: FileType::resolve(Some(&file.file_type), &file.file_name),
            id: file.id,
            file_name: file.file_name,
            path: file.path,
            url: file.url,
            size: file.size,
            download_count: file.download_count,
            uploaded_at: file.uploaded_at,
        }
    }
}

/// One failed entry in an upload batch
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadFailureDto {
    pub file_name: String,
    pub reason: String,
}

/// Per-file outcomes of a multi-file upload. Entries appear in the
/// order the files were submitted.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadBatchResponseDto {
    pub uploaded: Vec<FileResponseDto>,
    pub failed: Vec<UploadFailureDto>,
}

/// Query parameters for the file listing
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "snake_case")]
pub struct FileListQueryDto {
    /// Case-insensitive substring match on the filename
    pub search: Option<String>,
    /// Type tag to filter on, or "all"
    pub file_type: Option<String>,
    /// Inclusive lower bound on upload time (RFC 3339)
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on upload time (RFC 3339)
    pub to: Option<DateTime<Utc>>,
    pub sort_by: Option<SortKey>,
    pub sort_order: Option<SortOrder>,
}

impl FileListQueryDto {
    pub fn into_query(self) -> Result<FileQuery, AppError> {
        let type_filter = match self.file_type.as_deref() {
            None => TypeFilter::All,
            Some(value) => TypeFilter::parse(value).ok_or_else(|| {
                AppError::BadRequest(format!("Unknown file type filter: {}", value))
            })?,
        };

        let sort_by = self.sort_by.unwrap_or_default();

        Ok(FileQuery {
            search: self.search,
            type_filter,
            from: self.from,
            to: self.to,
            sort_by,
            sort_order: self.sort_order.unwrap_or(match sort_by {
                SortKey::Date => SortOrder::Desc,
                _ => SortOrder::Asc,
            }),
        })
    }
}

/// Request DTO for renaming a file
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RenameFileDto {
    /// New display name, including the extension
    #[validate(length(min = 1, max = 255, message = "file_name must be 1-255 characters"))]
    pub file_name: String,
}

/// Response DTO for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteFileResponseDto {
    pub deleted: bool,
}

/// Response DTO for share-link generation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShareLinkResponseDto {
    /// Presigned URL usable without authentication until it expires
    pub url: String,
    /// Lifetime of the link in seconds
    pub expires_in: u32,
}

/// Response DTO for the storage usage summary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StorageUsageDto {
    /// Bytes used across the account's full catalog
    pub used: i64,
    pub used_label: String,
    /// Total capacity in bytes
    pub capacity: i64,
    pub capacity_label: String,
    /// Used share of capacity, clamped to [0, 100]
    pub percent: f64,
}

impl From<StorageUsage> for StorageUsageDto {
    fn from(usage: StorageUsage) -> Self {
        Self {
            used_label: format_size(usage.used),
            capacity_label: format_size(usage.capacity),
            used: usage.used,
            capacity: usage.capacity,
            percent: usage.percent,
        }
    }
}

/// Allowed MIME types for file uploads
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "video/mp4",
    "video/quicktime",
    "video/webm",
    "video/x-msvideo",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "text/csv",
    "text/plain",
];

/// Check if a MIME type is allowed
pub fn is_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_params() -> FileListQueryDto {
        FileListQueryDto {
            search: None,
            file_type: None,
            from: None,
            to: None,
            sort_by: None,
            sort_order: None,
        }
    }

    #[test]
    fn test_into_query_defaults_to_newest_first() {
        let query = empty_params().into_query().unwrap();
        assert_eq!(query.type_filter, TypeFilter::All);
        assert_eq!(query.sort_by, SortKey::Date);
        assert_eq!(query.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_into_query_non_date_keys_default_ascending() {
        let mut params = empty_params();
        params.sort_by = Some(SortKey::Name);

        let query = params.into_query().unwrap();
        assert_eq!(query.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_into_query_rejects_unknown_type() {
        let mut params = empty_params();
        params.file_type = Some("spreadsheet".to_string());
        assert!(params.into_query().is_err());

        let mut params = empty_params();
        params.file_type = Some("all".to_string());
        assert_eq!(params.into_query().unwrap().type_filter, TypeFilter::All);
    }

    #[test]
    fn test_mime_allow_list() {
        assert!(is_mime_type_allowed("application/pdf"));
        assert!(is_mime_type_allowed("image/png"));
        assert!(!is_mime_type_allowed("application/x-msdownload"));
    }
}
