use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::core::error::Result;
use crate::shared::constants::RECENT_UPLOAD_WINDOW_DAYS;

/// Aggregated counters over all accounts and files
#[derive(Debug, FromRow)]
pub struct AdminStatsRow {
    pub total_users: i64,
    pub total_files: i64,
    pub total_bytes: i64,
    pub total_downloads: i64,
    pub recent_uploads: i64,
}

/// File row joined with its owner's profile
#[derive(Debug, FromRow)]
pub struct AdminFileRow {
    pub id: Uuid,
    pub file_name: String,
    pub size: i64,
    pub file_type: String,
    pub download_count: i64,
    pub uploaded_at: DateTime<Utc>,
    pub owner_id: Uuid,
    pub owner_fullname: String,
    pub owner_email: String,
}

/// Profile row with per-account storage totals
#[derive(Debug, FromRow)]
pub struct AdminUserRow {
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
}

/// Escape LIKE/ILIKE wildcards so a search term matches literally
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Service for admin dashboard queries
pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Service-wide counters for the dashboard header
    pub async fn stats(&self) -> Result<AdminStatsRow> {
        let stats = sqlx::query_as::<_, AdminStatsRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM profiles) AS total_users,
                COUNT(*) AS total_files,
                COALESCE(SUM(size), 0)::BIGINT AS total_bytes,
                COALESCE(SUM(download_count), 0)::BIGINT AS total_downloads,
                COUNT(*) FILTER (
                    WHERE uploaded_at >= NOW() - make_interval(days => $1)
                ) AS recent_uploads
            FROM files
            "#,
        )
        .bind(RECENT_UPLOAD_WINDOW_DAYS as i32)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get admin stats: {:?}", e);
            e
        })?;

        Ok(stats)
    }

    /// All files across all accounts, newest first.
    /// The search matches the filename, the owner's name or the owner's
    /// email, case-insensitively.
    pub async fn list_files(&self, search: Option<&str>) -> Result<Vec<AdminFileRow>> {
        let search = escape_like(search.unwrap_or_default().trim());

        let rows = sqlx::query_as::<_, AdminFileRow>(
            r#"
            SELECT
                f.id,
                f.file_name,
                f.size,
                f.file_type,
                f.download_count,
                f.uploaded_at,
                f.owner_id,
                p.fullname AS owner_fullname,
                p.email AS owner_email
            FROM files f
            JOIN profiles p ON p.id = f.owner_id
            WHERE $1 = ''
               OR f.file_name ILIKE '%' || $1 || '%'
               OR p.fullname ILIKE '%' || $1 || '%'
               OR p.email ILIKE '%' || $1 || '%'
            ORDER BY f.uploaded_at DESC
            "#,
        )
        .bind(&search)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list files for admin: {:?}", e);
            e
        })?;

        Ok(rows)
    }

    /// All accounts with per-account storage totals, newest first.
    /// The search matches the account's name or email, case-insensitively.
    pub async fn list_users(&self, search: Option<&str>) -> Result<Vec<AdminUserRow>> {
        let search = escape_like(search.unwrap_or_default().trim());

        let rows = sqlx::query_as::<_, AdminUserRow>(
            r#"
            SELECT
                p.id,
                p.email,
                p.fullname,
                p.employee_number,
                p.workshop,
                p.zone,
                p.phone,
                p.role,
                p.created_at,
                COUNT(f.id) AS file_count,
                COALESCE(SUM(f.size), 0)::BIGINT AS bytes_used
            FROM profiles p
            LEFT JOIN files f ON f.owner_id = p.id
            WHERE $1 = ''
               OR p.fullname ILIKE '%' || $1 || '%'
               OR p.email ILIKE '%' || $1 || '%'
            GROUP BY p.id
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(&search)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users for admin: {:?}", e);
            e
        })?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_makes_wildcards_literal() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like(r"back\slash"), r"back\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }
}
