use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::admin::dtos::{
    AdminFileDto, AdminSearchQueryDto, AdminStatsDto, AdminUserDto,
};
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::features::files::catalog::format_size;
use crate::shared::types::{ApiResponse, Meta};

/// Service-wide statistics for the admin dashboard
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "admin",
    responses(
        (status = 200, description = "Aggregated counters", body = ApiResponse<AdminStatsDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin role required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<AdminStatsDto>>, AppError> {
    let stats = service.stats().await?;

    Ok(Json(ApiResponse::success(
        Some(AdminStatsDto {
            total_bytes_label: format_size(stats.total_bytes),
            total_users: stats.total_users,
            total_files: stats.total_files,
            total_bytes: stats.total_bytes,
            total_downloads: stats.total_downloads,
            recent_uploads: stats.recent_uploads,
        }),
        None,
        None,
    )))
}

/// List every file across all accounts
#[utoipa::path(
    get,
    path = "/api/admin/files",
    tag = "admin",
    params(AdminSearchQueryDto),
    responses(
        (status = 200, description = "All files with their owners", body = ApiResponse<Vec<AdminFileDto>>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin role required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_files(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Query(params): Query<AdminSearchQueryDto>,
) -> Result<Json<ApiResponse<Vec<AdminFileDto>>>, AppError> {
    let rows = service.list_files(params.search.as_deref()).await?;

    let total = rows.len() as i64;
    let files: Vec<AdminFileDto> = rows.into_iter().map(AdminFileDto::from_row).collect();

    Ok(Json(ApiResponse::success(
        Some(files),
        None,
        Some(Meta { total }),
    )))
}

/// List every account with its storage totals
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    params(AdminSearchQueryDto),
    responses(
        (status = 200, description = "All accounts", body = ApiResponse<Vec<AdminUserDto>>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin role required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Query(params): Query<AdminSearchQueryDto>,
) -> Result<Json<ApiResponse<Vec<AdminUserDto>>>, AppError> {
    let rows = service.list_users(params.search.as_deref()).await?;

    let total = rows.len() as i64;
    let users: Vec<AdminUserDto> = rows.into_iter().map(AdminUserDto::from_row).collect();

    Ok(Json(ApiResponse::success(
        Some(users),
        None,
        Some(Meta { total }),
    )))
}
