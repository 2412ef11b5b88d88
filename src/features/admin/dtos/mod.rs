pub mod admin_dtos;

pub use admin_dtos::{AdminFileDto, AdminSearchQueryDto, AdminStatsDto, AdminUserDto};
