// Domain models
pub mod admin_page;
pub mod content_type;
pub mod rewrite;
pub mod settings;
