// Application services - orchestrate domain operations
pub mod rewrite_service;
pub mod settings_service;
