use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::dtos::{
    AuthResponseDto, AuthUserDto, LoginRequestDto, MeResponseDto, RegisterRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;

/// Register a new account
///
/// Creates the account profile with the "user" role. Admin elevation is
/// not available through this endpoint.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "Account registered", body = ApiResponse<AuthUserDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(service): State<Arc<AuthService>>,
    Json(dto): Json<RegisterRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<AuthUserDto>>), AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = service.register(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(AuthUserDto::from(profile)),
            Some("Account registered successfully".to_string()),
            None,
        )),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    Json(dto): Json<LoginRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (profile, token) = service.login(&dto.email, &dto.password).await?;

    let response = AuthResponseDto {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: service.token_ttl_secs(),
        user: AuthUserDto::from(profile),
    };

    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Get the current session identity
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current session", body = ApiResponse<MeResponseDto>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<MeResponseDto>>, AppError> {
    Ok(Json(ApiResponse::success(
        Some(MeResponseDto {
            account_id: user.account_id,
            email: user.email,
            role: user.role,
        }),
        None,
        None,
    )))
}
