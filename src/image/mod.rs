pub mod acquire;
pub mod fetch;
pub mod state;

pub use acquire::{ImageAcquirer, ImageResult, ImageSource};
pub use fetch::ImageFetcher;
pub use state::{ImageCycle, ImagePhase};
