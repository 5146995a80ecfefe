// Persistence utilities
pub mod file_system;
