// Presentation layer - admin screens exposed to the host
pub mod admin;
pub mod errors;
