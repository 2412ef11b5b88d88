use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for account profiles
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub fullname: String,
    pub employee_number: String,
    pub workshop: String,
    pub zone: String,
    pub phone: String,
    pub role: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
