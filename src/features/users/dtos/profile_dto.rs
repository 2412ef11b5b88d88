use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::users::models::Profile;

/// Response DTO for an account profile
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserProfileResponseDto {
    pub id: Uuid,
    pub email: String,
    pub fullname: String,
    pub employee_number: String,
    pub workshop: String,
    pub zone: String,
    pub phone: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for UserProfileResponseDto {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            email: p.email,
            fullname: p.fullname,
            employee_number: p.employee_number,
            workshop: p.workshop,
            zone: p.zone,
            phone: p.phone,
            role: p.role,
            created_at: p.created_at,
        }
    }
}
