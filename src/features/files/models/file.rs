use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// File metadata record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    pub id: Uuid,
    /// Display name shown in listings
    pub file_name: String,
    /// Object key in the storage backend, unique across the bucket
    pub path: String,
    /// Public URL derived from the object key
    pub url: String,
    /// Size in bytes
    pub size: i64,
    /// Stored type tag ("pdf", "image", ...)
    pub file_type: String,
    pub download_count: i64,
    pub owner_id: Uuid,
    pub uploaded_at: DateTime<Utc>,
}
