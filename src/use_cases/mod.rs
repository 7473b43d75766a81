pub mod auth_service;
pub mod blog_database;
pub mod blog_service;
pub mod crud_error;
pub mod database;
pub mod note_database;
pub mod note_service;
pub mod ownership;
pub mod user_database;
pub mod user_service;
