pub mod blog;
pub mod dto;
pub mod note;
pub mod user;
