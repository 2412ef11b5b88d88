use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::files::catalog::{CatalogEntry, FileType};
use crate::features::files::models::File;
use crate::modules::storage::ObjectStore;
use crate::shared::validation::normalize_file_name;

/// Service for file operations
///
/// Every mutation follows the same discipline: storage and metadata are
/// two separate systems, so each operation orders its writes to keep
/// the catalog authoritative and compensates (or logs) when the second
/// write fails.
pub struct FileService {
    pool: PgPool,
    store: Arc<ObjectStore>,
}

impl FileService {
    pub fn new(pool: PgPool, store: Arc<ObjectStore>) -> Self {
        Self { pool, store }
    }

    /// Fetch the account's full catalog, newest first
    pub async fn catalog(&self, owner_id: Uuid) -> Result<Vec<CatalogEntry>> {
        let files = sqlx::query_as::<_, File>(
            r#"
            SELECT * FROM files
            WHERE owner_id = $1
            ORDER BY uploaded_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(files.into_iter().map(Self::to_catalog_entry).collect())
    }

    /// Upload one file: object first, metadata second.
    ///
    /// If the metadata insert fails after the object landed, the orphaned
    /// object is logged and left in place; it is invisible to the catalog.
    pub async fn upload(
        &self,
        owner_id: Uuid,
        original_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<File> {
        let size = data.len() as i64;
        let normalized = normalize_file_name(original_name);
        if normalized.is_empty() {
            return Err(AppError::Validation("File name is empty".to_string()));
        }

        // Millisecond prefix keeps keys unique per owner without renaming
        // the file the user sees.
        let key = format!(
            "{}/{}_{}",
            owner_id,
            Utc::now().timestamp_millis(),
            normalized
        );
        let file_type = FileType::from_upload(content_type, original_name);

        self.store.upload(&key, data, content_type).await?;
        debug!("Object stored: {}", key);

        let url = self.store.public_url(&key);

        let file = sqlx::query_as::<_, File>(
            r#"
            INSERT INTO files (file_name, path, url, size, file_type, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(original_name)
        .bind(&key)
        .bind(&url)
        .bind(size)
        .bind(file_type.as_str())
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Metadata insert failed, orphaned object left at {}: {}", key, e);
            AppError::from(e)
        })?;

        info!(
            "File uploaded: id={}, key={}, size={}, type={}",
            file.id, file.path, file.size, file.file_type
        );

        Ok(file)
    }

    /// Rename a file: move the object, then update the metadata row.
    ///
    /// The display name, object key, URL and type tag change together. If
    /// the metadata update fails the object is moved back so neither side
    /// is left pointing at the other's old state.
    pub async fn rename(&self, owner_id: Uuid, file_id: Uuid, new_name: &str) -> Result<File> {
        let file = self.find_owned(owner_id, file_id).await?;
        let plan = rename_plan(&file.file_name, &file.path, new_name)?;

        self.store.move_object(&file.path, &plan.key).await?;

        let new_url = self.store.public_url(&plan.key);

        let updated = sqlx::query_as::<_, File>(
            r#"
            UPDATE files
            SET file_name = $1, path = $2, url = $3, file_type = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&plan.file_name)
        .bind(&plan.key)
        .bind(&new_url)
        .bind(plan.file_type.as_str())
        .bind(file.id)
        .fetch_one(&self.pool)
        .await;

        match updated {
            Ok(updated) => {
                info!("File renamed: id={}, key={}", updated.id, updated.path);
                Ok(updated)
            }
            Err(e) => {
                // Put the object back so metadata stays consistent.
                if let Err(move_err) = self.store.move_object(&plan.key, &file.path).await {
                    error!(
                        "Failed to restore object after rename rollback, key={}: {}",
                        plan.key, move_err
                    );
                }
                Err(AppError::from(e))
            }
        }
    }

    /// Delete a file: metadata row first, then the object.
    ///
    /// A failed object delete leaves an orphan that is already invisible
    /// to the catalog, so it is logged and the operation still succeeds.
    pub async fn delete(&self, owner_id: Uuid, file_id: Uuid) -> Result<()> {
        let file = self.find_owned(owner_id, file_id).await?;

        sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(file.id)
            .execute(&self.pool)
            .await?;

        if let Err(e) = self.store.delete(&file.path).await {
            warn!("Orphaned object left at {} after delete: {}", file.path, e);
        }

        info!("File deleted: id={}, key={}", file.id, file.path);

        Ok(())
    }

    /// Fetch a file's bytes for download and bump its download counter.
    ///
    /// The counter update is an atomic SQL increment and is non-fatal: a
    /// failed bump never blocks the download.
    pub async fn download(&self, owner_id: Uuid, file_id: Uuid) -> Result<(File, Vec<u8>)> {
        let file = self.find_owned(owner_id, file_id).await?;

        let data = self.store.download(&file.path).await?;

        if let Err(e) = sqlx::query(
            "UPDATE files SET download_count = download_count + 1 WHERE id = $1",
        )
        .bind(file.id)
        .execute(&self.pool)
        .await
        {
            warn!("Failed to bump download count for {}: {}", file.id, e);
        }

        Ok((file, data))
    }

    /// Generate a time-limited presigned link for sharing
    pub async fn share(&self, owner_id: Uuid, file_id: Uuid) -> Result<(String, u32)> {
        let file = self.find_owned(owner_id, file_id).await?;

        let url = self.store.presigned_url(&file.path).await?;

        Ok((url, self.store.presigned_url_expiry_secs()))
    }

    /// Look up a file and enforce ownership
    async fn find_owned(&self, owner_id: Uuid, file_id: Uuid) -> Result<File> {
        let file = sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(file_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

        if file.owner_id != owner_id {
            return Err(AppError::Forbidden(
                "You do not have permission to access this file".to_string(),
            ));
        }

        Ok(file)
    }

    fn to_catalog_entry(file: File) -> CatalogEntry {
        CatalogEntry {
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

/// Validated target state for a rename
struct RenamePlan {
    /// Normalized name, stored as the display name from then on
    file_name: String,
    /// New object key: the old key with its final segment replaced
    key: String,
    file_type: FileType,
}

fn rename_plan(current_name: &str, current_path: &str, requested: &str) -> Result<RenamePlan> {
    let requested = requested.trim();
    if requested.is_empty() {
        return Err(AppError::Validation("File name is empty".to_string()));
    }

    let normalized = normalize_file_name(requested);
    if normalized.is_empty() {
        return Err(AppError::Validation("File name is empty".to_string()));
    }

    let key = match current_path.rsplit_once('/') {
        Some((prefix, _)) => format!("{}/{}", prefix, normalized),
        None => normalized.clone(),
    };
    if requested == current_name || normalized == current_name || key == current_path {
        return Err(AppError::Validation(
            "New name is the same as the current name".to_string(),
        ));
    }

    let file_type = FileType::infer_from_name(&normalized);

    Ok(RenamePlan {
        file_name: normalized,
        key,
        file_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_stores_normalized_display_name() {
        let plan = rename_plan("report.pdf", "owner/1700000000000_report.pdf", "Q3 Report.PDF")
            .unwrap();

        assert_eq!(plan.file_name, "q3_report.pdf");
        assert_eq!(plan.key, "owner/q3_report.pdf");
        assert_eq!(plan.file_type, FileType::Pdf);
    }

    #[test]
    fn test_rename_rederives_type_from_new_extension() {
        let plan = rename_plan("notes.pdf", "owner/notes.pdf", "notes.docx").unwrap();
        assert_eq!(plan.file_type, FileType::Word);
    }

    #[test]
    fn test_rename_rejects_empty_and_unchanged_names() {
        assert!(rename_plan("a.pdf", "owner/a.pdf", "").is_err());
        assert!(rename_plan("a.pdf", "owner/a.pdf", "   ").is_err());
        assert!(rename_plan("a.pdf", "owner/a.pdf", "a.pdf").is_err());
        // Normalizes to the current name
        assert!(rename_plan("a.pdf", "owner/a.pdf", "A.PDF").is_err());
    }
}
