use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::admin::handlers::admin_handlers::{get_stats, list_files, list_users};
use crate::features::admin::services::AdminService;

/// Create routes for the admin feature
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/api/admin/stats", get(get_stats))
        .route("/api/admin/files", get(list_files))
        .route("/api/admin/users", get(list_users))
        .with_state(admin_service)
}
