// Admin screen rendering and form handling
pub mod markup;
pub mod nonce;
pub mod settings_page;
