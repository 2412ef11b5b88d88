use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::Profile;

/// Request DTO for account registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password policy (8-20 chars, mixed case, digit, special) is checked
    /// separately by the service
    #[validate(length(min = 8, max = 20, message = "Password must be 8-20 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub fullname: String,

    #[validate(length(min = 1, max = 50, message = "Employee number must be 1-50 characters"))]
    pub employee_number: String,

    #[validate(length(min = 1, max = 100, message = "Workshop must be 1-100 characters"))]
    pub workshop: String,

    #[validate(length(min = 1, max = 100, message = "Zone must be 1-100 characters"))]
    pub zone: String,

    #[validate(length(min = 1, max = 30, message = "Phone must be 1-30 characters"))]
    pub phone: String,
}

/// Request DTO for login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Account info embedded in auth responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthUserDto {
    pub id: Uuid,
    pub email: String,
    pub fullname: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for AuthUserDto {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            email: p.email,
            fullname: p.fullname,
            role: p.role,
            created_at: p.created_at,
        }
    }
}

/// Response DTO for successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: AuthUserDto,
}

/// Response DTO for the current session identity
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponseDto {
    pub account_id: Uuid,
    pub email: String,
    pub role: String,
}
