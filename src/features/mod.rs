pub mod admin;
pub mod auth;
pub mod files;
pub mod users;
