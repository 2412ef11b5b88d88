use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::UserProfileResponseDto;
use crate::features::users::services::ProfileService;
use crate::shared::types::ApiResponse;

/// Get the authenticated account's profile
#[utoipa::path(
    get,
    path = "/api/users/profile",
    tag = "users",
    responses(
        (status = 200, description = "Account profile", body = ApiResponse<UserProfileResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Profile not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<ProfileService>>,
) -> Result<Json<ApiResponse<UserProfileResponseDto>>, AppError> {
    let profile = service.get_by_id(user.account_id).await?;

    Ok(Json(ApiResponse::success(
        Some(UserProfileResponseDto::from(profile)),
        None,
        None,
    )))
}
