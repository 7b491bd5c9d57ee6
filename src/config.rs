use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::error::{FusionError, FusionResult};

pub const DEFAULT_STYLE_MODIFIER: &str = "delicious food, vibrant, professional photography";

/// Settings for the authenticated image-generation service.
#[derive(Debug, Clone)]
pub struct PrimaryConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub size: String,
    pub timeout: Option<Duration>,
}

impl Default for PrimaryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: "https://api.openai.com/v1/images/generations".to_string(),
            model: "dall-e-3".to_string(),
            size: "1024x1024".to_string(),
            timeout: None,
        }
    }
}

/// Settings for the keyless fallback image service.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackConfig {
    /// Scheme, host and path prefix without a trailing slash; the escaped
    /// prompt is appended as the last path segment.
    pub base: String,
    pub width: u32,
    pub height: u32,
    pub model: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            base: "https://image.pollinations.ai/prompt".to_string(),
            width: 384,
            height: 384,
            model: "turbo".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FusionConfig {
    pub primary: PrimaryConfig,
    pub fallback: FallbackConfig,
    pub style_modifier: String,
    pub pools_path: Option<PathBuf>,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            primary: PrimaryConfig::default(),
            fallback: FallbackConfig::default(),
            style_modifier: DEFAULT_STYLE_MODIFIER.to_string(),
            pools_path: None,
        }
    }
}

impl FusionConfig {
    pub fn from_env() -> FusionResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, defaulting whatever is unset.
    pub fn from_lookup<F>(lookup: F) -> FusionResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let primary = PrimaryConfig {
            api_key: var("FUSION_IMAGE_API_KEY").or_else(|| var("OPENAI_API_KEY")),
            api_url: var("FUSION_IMAGE_API_URL").unwrap_or(defaults.primary.api_url),
            model: var("FUSION_IMAGE_MODEL").unwrap_or(defaults.primary.model),
            size: var("FUSION_IMAGE_SIZE").unwrap_or(defaults.primary.size),
            timeout: var("FUSION_IMAGE_TIMEOUT_SECS")
                .map(|v| parse_number::<u64>("FUSION_IMAGE_TIMEOUT_SECS", &v))
                .transpose()?
                .map(Duration::from_secs),
        };

        let base = match var("FUSION_FALLBACK_BASE") {
            Some(raw) => parse_fallback_base(&raw)?,
            None => defaults.fallback.base,
        };

        let fallback = FallbackConfig {
            base,
            width: var("FUSION_FALLBACK_WIDTH")
                .map(|v| parse_number("FUSION_FALLBACK_WIDTH", &v))
                .transpose()?
                .unwrap_or(defaults.fallback.width),
            height: var("FUSION_FALLBACK_HEIGHT")
                .map(|v| parse_number("FUSION_FALLBACK_HEIGHT", &v))
                .transpose()?
                .unwrap_or(defaults.fallback.height),
            model: var("FUSION_FALLBACK_MODEL").unwrap_or(defaults.fallback.model),
        };

        Ok(Self {
            primary,
            fallback,
            style_modifier: var("FUSION_STYLE_MODIFIER").unwrap_or(defaults.style_modifier),
            pools_path: var("FUSION_POOLS").map(PathBuf::from),
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> FusionResult<T> {
    value
        .parse()
        .map_err(|_| FusionError::Config(format!("{} must be a number, got '{}'", key, value)))
}

pub fn parse_fallback_base(raw: &str) -> FusionResult<String> {
    let url = Url::parse(raw)
        .map_err(|e| FusionError::Config(format!("invalid fallback base '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(FusionError::Config(format!("fallback base '{}' has no host", raw)));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(FusionError::Config(format!(
            "fallback base '{}' must not carry a query or fragment",
            raw
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}
