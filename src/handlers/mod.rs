// Handler modules
pub mod export;
pub mod resolve;
pub mod template;

// Re-export all handler functions
pub use export::handle_export;
pub use resolve::{handle_current, handle_images, handle_resolve};
pub use template::handle_template;
