use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::files::catalog::{format_size, FileType};

/// Service-wide counters for the admin dashboard header
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminStatsDto {
    pub total_users: i64,
    pub total_files: i64,
    /// Bytes stored across all accounts
    pub total_bytes: i64,
    pub total_bytes_label: String,
    pub total_downloads: i64,
    /// Files uploaded within the recent-activity window
    pub recent_uploads: i64,
}

/// One file row in the admin listing, joined with its owner
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminFileDto {
    pub id: Uuid,
    pub file_name: String,
    pub size: i64,
    pub size_label: String,
    pub file_type: FileType,
    pub download_count: i64,
    pub uploaded_at: DateTime<Utc>,
    pub owner_id: Uuid,
    pub owner_fullname: String,
    pub owner_email: String,
}

impl AdminFileDto {
    pub fn from_row(row: crate::features::admin::services::AdminFileRow) -> Self {
        Self {
            size_label: format_size(row.size),
            file_type: FileType::resolve(Some(&row.file_type), &row.file_name),
            id: row.id,
            file_name: row.file_name,
            size: row.size,
            download_count: row.download_count,
            uploaded_at: row.uploaded_at,
            owner_id: row.owner_id,
            owner_fullname: row.owner_fullname,
            owner_email: row.owner_email,
        }
    }
}

/// One account row in the admin listing, with per-account storage totals
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminUserDto {
    pub id: Uuid,
    pub email: String,
    pub fullname: String,
    pub employee_number: String,
    pub workshop: String,
    pub zone: String,
    pub phone: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub file_count: i64,
    pub bytes_used: i64,
    pub bytes_used_label: String,
}

impl AdminUserDto {
    pub fn from_row(row: crate::features::admin::services::AdminUserRow) -> Self {
        Self {
            bytes_used_label: format_size(row.bytes_used),
            id: row.id,
            email: row.email,
            fullname: row.fullname,
            employee_number: row.employee_number,
            workshop: row.workshop,
            zone: row.zone,
            phone: row.phone,
            role: row.role,
            created_at: row.created_at,
            file_count: row.file_count,
            bytes_used: row.bytes_used,
        }
    }
}

/// Search parameter shared by the admin listings
#[derive(Debug, Deserialize, IntoParams)]
pub struct AdminSearchQueryDto {
    /// Case-insensitive substring match; files match on filename, owner
    /// name or owner email, users on name or email
    pub search: Option<String>,
}
