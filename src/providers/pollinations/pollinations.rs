use async_trait::async_trait;
use anyhow::Result;

use crate::config::FallbackConfig;
use crate::providers::traits::ImageProvider;

/// Builds image URLs for a keyless, render-on-fetch image service.
///
/// Nothing is requested here: the service renders the image when the URL is
/// fetched by whoever displays it, so building a URL cannot fail.
#[derive(Debug, Clone)]
pub struct FallbackUrlBuilder {
    config: FallbackConfig,
}

impl FallbackUrlBuilder {
    pub fn new(config: FallbackConfig) -> Self {
        Self { config }
    }

    /// Pure function of `(prompt, seed)`.
    pub fn build(&self, prompt: &str, seed: u64) -> String {
        format!(
            "{}/{}?width={}&height={}&seed={}&nologo=true&model={}",
            self.config.base,
            urlencoding::encode(prompt),
            self.config.width,
            self.config.height,
            seed,
            urlencoding::encode(&self.config.model),
        )
    }
}

impl Default for FallbackUrlBuilder {
    fn default() -> Self {
        Self::new(FallbackConfig::default())
    }
}

#[async_trait]
impl ImageProvider for FallbackUrlBuilder {
    async fn generate_image(&self, prompt: &str, seed: u64) -> Result<String> {
        Ok(self.build(prompt, seed))
    }

    fn name(&self) -> &'static str {
        "pollinations"
    }

    fn clone_box(&self) -> Box<dyn ImageProvider> {
        Box::new(self.clone())
    }
}
