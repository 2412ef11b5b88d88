/// Maximum size of a single uploaded file in bytes (50MB)
pub const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Maximum multipart body size for one upload request: room for a batch
/// of full-size files plus form overhead
pub const MAX_UPLOAD_BATCH_SIZE: usize = 10 * MAX_FILE_SIZE + 1024 * 1024;

/// Per-account storage capacity in bytes (100MB)
pub const STORAGE_CAPACITY: i64 = 100 * 1024 * 1024;

/// Window for the admin "recent uploads" counter, in days
pub const RECENT_UPLOAD_WINDOW_DAYS: i64 = 7;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - full access including the aggregate dashboard
pub const ROLE_ADMIN: &str = "admin";

/// User role - owns and manages their own files only
pub const ROLE_USER: &str = "user";
