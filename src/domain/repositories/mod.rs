// Repository interfaces - implemented by host adapters in the infrastructure layer
pub mod admin_menu_repository;
pub mod content_type_repository;
pub mod rewrite_repository;
pub mod settings_repository;
