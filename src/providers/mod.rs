pub mod openai;
pub mod pollinations;
pub mod traits;

pub use openai::openai::OpenAIImageProvider;
pub use pollinations::pollinations::FallbackUrlBuilder;
pub use traits::ImageProvider;
