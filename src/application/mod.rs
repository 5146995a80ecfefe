// Application layer - services and DTOs on top of the domain
pub mod dto;
pub mod errors;
pub mod services;
