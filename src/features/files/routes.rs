use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::features::files::handlers::file_handler::{
    delete_file, download_file, list_files, rename_file, share_file, storage_usage, upload_files,
};
use crate::features::files::services::FileService;
use crate::shared::constants::MAX_UPLOAD_BATCH_SIZE;

/// Create routes for the files feature
pub fn routes(file_service: Arc<FileService>) -> Router {
    Router::new()
        .route(
            "/api/files/upload",
            // The limit covers a whole batch; per-file size is checked in
            // the handler
            post(upload_files).layer(DefaultBodyLimit::max(MAX_UPLOAD_BATCH_SIZE)),
        )
        .route("/api/files", get(list_files))
        .route("/api/files/storage", get(storage_usage))
        .route("/api/files/{id}", delete(delete_file))
        .route("/api/files/{id}/rename", patch(rename_file))
        .route("/api/files/{id}/download", get(download_file))
        .route("/api/files/{id}/share", get(share_file))
        .with_state(file_service)
}
