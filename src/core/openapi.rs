use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers::admin_handlers};
use crate::features::auth;
use crate::features::files::{catalog, dtos as files_dtos, handlers::file_handler};
use crate::features::users::{dtos as users_dtos, handlers::profile_handler};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::get_me,
        // Users
        profile_handler::get_profile,
        // Files
        file_handler::list_files,
        file_handler::upload_files,
        file_handler::rename_file,
        file_handler::delete_file,
        file_handler::download_file,
        file_handler::share_file,
        file_handler::storage_usage,
        // Admin
        admin_handlers::get_stats,
        admin_handlers::list_files,
        admin_handlers::list_users,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            auth::dtos::RegisterRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::AuthUserDto,
            auth::dtos::MeResponseDto,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::dtos::AuthUserDto>,
            ApiResponse<auth::dtos::MeResponseDto>,
            // Users
            users_dtos::UserProfileResponseDto,
            ApiResponse<users_dtos::UserProfileResponseDto>,
            // Files
            catalog::FileType,
            catalog::SortKey,
            catalog::SortOrder,
            files_dtos::UploadFilesDto,
            files_dtos::FileResponseDto,
            files_dtos::UploadBatchResponseDto,
            files_dtos::UploadFailureDto,
            files_dtos::RenameFileDto,
            files_dtos::DeleteFileResponseDto,
            files_dtos::ShareLinkResponseDto,
            files_dtos::StorageUsageDto,
            ApiResponse<Vec<files_dtos::FileResponseDto>>,
            ApiResponse<files_dtos::FileResponseDto>,
            ApiResponse<files_dtos::UploadBatchResponseDto>,
            ApiResponse<files_dtos::DeleteFileResponseDto>,
            ApiResponse<files_dtos::ShareLinkResponseDto>,
            ApiResponse<files_dtos::StorageUsageDto>,
            // Admin
            admin_dtos::AdminStatsDto,
            admin_dtos::AdminFileDto,
            admin_dtos::AdminUserDto,
            ApiResponse<admin_dtos::AdminStatsDto>,
            ApiResponse<Vec<admin_dtos::AdminFileDto>>,
            ApiResponse<Vec<admin_dtos::AdminUserDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Account registration and login"),
        (name = "users", description = "Account profile"),
        (name = "files", description = "File upload, listing and management"),
        (name = "admin", description = "Admin dashboard (admin role only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "DocuVault API",
        version = "0.1.0",
        description = "API documentation for DocuVault",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
