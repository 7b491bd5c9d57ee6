pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod food;
pub mod image;
pub mod progress;
pub mod providers;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used items
pub use config::FusionConfig;
pub use error::{FusionError, FusionResult};
pub use food::{ComboGenerator, DishCombo, Pools};
pub use image::{ImageAcquirer, ImageResult, ImageSource};
pub use session::FusionSession;
