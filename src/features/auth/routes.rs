use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::auth::handlers::{get_me, login, register};
use crate::features::auth::services::AuthService;

/// Routes that require no session (register/login)
pub fn public_routes(auth_service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .with_state(auth_service)
}

/// Routes behind the session gate
pub fn protected_routes() -> Router {
    Router::new().route("/api/auth/me", get(get_me))
}
