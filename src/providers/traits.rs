use async_trait::async_trait;
use anyhow::Result;

/// A service that turns a finished prompt into a displayable image URL.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// `seed` lets services that support it reproduce an image.
    async fn generate_image(&self, prompt: &str, seed: u64) -> Result<String>;

    fn name(&self) -> &'static str;

    fn clone_box(&self) -> Box<dyn ImageProvider>;
}

impl Clone for Box<dyn ImageProvider> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
