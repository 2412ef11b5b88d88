pub mod file_dto;

pub use file_dto::{
    is_mime_type_allowed, DeleteFileResponseDto, FileListQueryDto, FileResponseDto, RenameFileDto,
    ShareLinkResponseDto, StorageUsageDto, UploadBatchResponseDto, UploadFailureDto,
    UploadFilesDto, ALLOWED_MIME_TYPES,
};
