// Data Transfer Objects
pub mod settings_dto;
