// Logging infrastructure
pub mod logger;
