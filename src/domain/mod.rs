// Domain layer - core models and host-facing interfaces
pub mod errors;
pub mod models;
pub mod repositories;
