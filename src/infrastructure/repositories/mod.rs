// Repository implementations - host adapters backing the domain interfaces
pub mod file_settings_repository;
pub mod memory_admin_menu_repository;
pub mod memory_content_type_repository;
pub mod memory_rewrite_repository;
pub mod memory_settings_repository;
