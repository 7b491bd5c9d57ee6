use anyhow::Result;
use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::FusionConfig;
use crate::error::{FusionError, FusionResult};
use crate::providers::openai::openai::OpenAIImageProvider;
use crate::providers::pollinations::pollinations::FallbackUrlBuilder;
use crate::providers::traits::ImageProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    Primary,
    Fallback,
}

/// A displayable image URL plus what it took to get it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResult {
    pub url: String,
    pub source: ImageSource,
    pub seed: u64,
    /// Prompt as sent, style modifier included.
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_error: Option<String>,
}

/// Primary image service with a keyless fallback. Primary failures never
/// leave this type; they turn into a fallback URL.
pub struct ImageAcquirer {
    primary: Box<dyn ImageProvider>,
    fallback: FallbackUrlBuilder,
    style_modifier: String,
}

impl Clone for ImageAcquirer {
    fn clone(&self) -> Self {
        Self {
            primary: self.primary.clone(),
            fallback: self.fallback.clone(),
            style_modifier: self.style_modifier.clone(),
        }
    }
}

impl ImageAcquirer {
    pub fn new(
        primary: Box<dyn ImageProvider>,
        fallback: FallbackUrlBuilder,
        style_modifier: impl Into<String>,
    ) -> Self {
        Self {
            primary,
            fallback,
            style_modifier: style_modifier.into(),
        }
    }

    pub fn from_config(config: &FusionConfig) -> Result<Self> {
        let primary = OpenAIImageProvider::new(config.primary.clone())?;
        if !primary.has_api_key() {
            info!("No image API key configured, every image will use the fallback service");
        }
        Ok(Self::new(
            Box::new(primary),
            FallbackUrlBuilder::new(config.fallback.clone()),
            config.style_modifier.clone(),
        ))
    }

    pub fn primary_name(&self) -> &'static str {
        self.primary.name()
    }

    /// Appends the style modifier to a dish prompt.
    pub fn full_prompt(&self, prompt: &str) -> String {
        let prompt = prompt.trim();
        if self.style_modifier.is_empty() {
            prompt.to_string()
        } else if prompt.is_empty() {
            self.style_modifier.clone()
        } else {
            format!("{}, {}", prompt, self.style_modifier)
        }
    }

    /// Acquires an image with a freshly drawn seed.
    pub async fn acquire_image(&self, prompt: &str) -> ImageResult {
        let seed = u64::from(rand::thread_rng().gen::<u32>());
        self.acquire_image_seeded(prompt, seed).await
    }

    pub async fn acquire_image_seeded(&self, prompt: &str, seed: u64) -> ImageResult {
        let full_prompt = self.full_prompt(prompt);
        match self.request_primary(&full_prompt, seed).await {
            Ok(image) => image,
            Err(failure) => self.fallback(&full_prompt, seed, Some(failure.to_string())),
        }
    }

    /// One call to the primary service. `full_prompt` already carries the
    /// style modifier.
    pub async fn request_primary(&self, full_prompt: &str, seed: u64) -> FusionResult<ImageResult> {
        match self.primary.generate_image(full_prompt, seed).await {
            Ok(url) => {
                info!("Image ready from {} (seed {})", self.primary.name(), seed);
                Ok(ImageResult {
                    url,
                    source: ImageSource::Primary,
                    seed,
                    prompt: full_prompt.to_string(),
                    primary_error: None,
                })
            }
            Err(e) => {
                let failure = FusionError::ImagePrimaryFailure(e.to_string());
                warn!("{}, falling back to {}", failure, self.fallback.name());
                Err(failure)
            }
        }
    }

    /// Builds the fallback URL. Performs no I/O.
    pub fn fallback(&self, full_prompt: &str, seed: u64, reason: Option<String>) -> ImageResult {
        let url = self.fallback.build(full_prompt, seed);
        info!("Image URL built for {} (seed {})", self.fallback.name(), seed);
        ImageResult {
            url,
            source: ImageSource::Fallback,
            seed,
            prompt: full_prompt.to_string(),
            primary_error: reason,
        }
    }
}
