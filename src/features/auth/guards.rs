//! Role-based authorization guards for the application.
//!
//! These guards extract the authenticated user and verify they have the
//! required role. A request reaches a guard only after the session
//! middleware has resolved the token, so a missing user here means the
//! route was wired outside the protected router.
//!
//! Role hierarchy:
//! - admin: aggregate dashboard over all users and files
//! - user: owns and manages their own files

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for checking if user is admin.
///
/// Only allows users with the "admin" role; everyone else gets 403.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}
