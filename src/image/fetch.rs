use anyhow::{anyhow, Result};
use log::{debug, info};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

/// Stands in for the display layer: fetches an image URL the way a browser
/// `<img>` would, so a failed fetch is the load-error signal.
#[derive(Clone, Default)]
pub struct ImageFetcher {
    client: Client,
}

impl ImageFetcher {
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Downloading image from {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to fetch image: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Failed to download image: HTTP {}", status));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("image/") {
            return Err(anyhow!("Expected an image, got '{}'", content_type));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| anyhow!("Failed to read image body: {}", e))?;
        if bytes.is_empty() {
            return Err(anyhow!("Image body is empty"));
        }

        info!("Image downloaded | Size: {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::{http::header, routing::get, Router};

    fn app() -> Router {
        Router::new()
            .route("/ok.png", get(|| async { ([(header::CONTENT_TYPE, "image/png")], vec![137u8, 80, 78, 71]) }))
            .route("/page", get(|| async { ([(header::CONTENT_TYPE, "text/html")], "<html></html>") }))
            .route("/empty.png", get(|| async { ([(header::CONTENT_TYPE, "image/png")], Vec::<u8>::new()) }))
    }

    #[tokio::test]
    async fn test_download_image() {
        let base = serve(app()).await;
        let bytes = ImageFetcher::default().download(&format!("{}/ok.png", base)).await.unwrap();
        assert_eq!(bytes, vec![137u8, 80, 78, 71]);
    }

    #[tokio::test]
    async fn test_download_rejects_non_images() {
        let base = serve(app()).await;
        let fetcher = ImageFetcher::default();

        let err = fetcher.download(&format!("{}/missing.png", base)).await.unwrap_err();
        assert!(err.to_string().contains("404"));

        let err = fetcher.download(&format!("{}/page", base)).await.unwrap_err();
        assert!(err.to_string().contains("text/html"));

        assert!(fetcher.download(&format!("{}/empty.png", base)).await.is_err());
    }
}
