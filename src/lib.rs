pub mod domain;
pub mod infra;
pub mod settings;
pub mod use_cases;
