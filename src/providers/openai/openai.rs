use async_trait::async_trait;
use anyhow::{anyhow, Result};
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::PrimaryConfig;
use crate::providers::traits::ImageProvider;

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    response_format: &'a str,
}

#[derive(Deserialize, Debug)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize, Debug)]
struct ImageData {
    url: Option<String>,
    revised_prompt: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    error: ApiErrorDetails,
}

#[derive(Deserialize, Debug)]
struct ApiErrorDetails {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

/// Client for an OpenAI-compatible `images/generations` endpoint.
#[derive(Clone)]
pub struct OpenAIImageProvider {
    api_key: Option<String>,
    api_url: String,
    model: String,
    size: String,
    client: Client,
}

impl OpenAIImageProvider {
    pub fn new(config: PrimaryConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| anyhow!("Failed to build image client: {}", e))?;

        Ok(Self {
            api_key: config.api_key,
            api_url: config.api_url,
            model: config.model,
            size: config.size,
            client,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl ImageProvider for OpenAIImageProvider {
    async fn generate_image(&self, prompt: &str, _seed: u64) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("image API key not set"))?;

        debug!(
            "Requesting image from {} | model: {} | prompt: '{}'",
            self.api_url,
            self.model,
            prompt.chars().take(100).collect::<String>()
        );

        let request = ImageRequest {
            model: &self.model,
            prompt,
            n: 1,
            size: &self.size,
            response_format: "url",
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to send request: {}", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read response: {}", e))?;

        parse_image_response(status, &body)
    }

    fn name(&self) -> &'static str {
        "openai"
    }

    fn clone_box(&self) -> Box<dyn ImageProvider> {
        Box::new(self.clone())
    }
}

fn parse_image_response(status: StatusCode, body: &str) -> Result<String> {
    if !status.is_success() {
        return match serde_json::from_str::<ApiError>(body) {
            Ok(err) => {
                error!("Image API error: {} (type: {:?})", err.error.message, err.error.error_type);
                Err(anyhow!("image API error ({}): {}", status, err.error.message))
            }
            Err(_) => Err(anyhow!("image API error (status {})", status)),
        };
    }

    let parsed: ImageResponse =
        serde_json::from_str(body).map_err(|e| anyhow!("Failed to parse image response: {}", e))?;

    let image = parsed
        .data
        .into_iter()
        .find(|d| d.url.as_deref().map_or(false, |u| !u.is_empty()))
        .ok_or_else(|| anyhow!("No image URL in response"))?;

    if let Some(revised) = &image.revised_prompt {
        debug!("Image service revised prompt to '{}'", revised);
    }

    image.url.ok_or_else(|| anyhow!("No image URL in response"))
}
