use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::users::handlers::profile_handler::get_profile;
use crate::features::users::services::ProfileService;

/// Create routes for the users feature
pub fn routes(profile_service: Arc<ProfileService>) -> Router {
    Router::new()
        .route("/api/users/profile", get(get_profile))
        .with_state(profile_service)
}
