//! KakaoTalk emoticon store client.
//!
//! The store exposes each pack page at `/t/<token>` and its JSON metadata at
//! `/api/v1/items/t/<token>`. No authentication is required.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use super::types::MetadataResponse;
use super::{PackMetadata, PackSource, PackUrl, SourceError};
use crate::config::SourceConfig;
use crate::metrics::EXTERNAL_REQUESTS;

/// HTTP client for the emoticon store.
pub struct KakaoClient {
    client: Client,
    base_url: String,
}

impl KakaoClient {
    /// Create a new store client.
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, url: &str, kind: &str) -> Result<Response, SourceError> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                EXTERNAL_REQUESTS.with_label_values(&[kind, "error"]).inc();
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            EXTERNAL_REQUESTS.with_label_values(&[kind, "error"]).inc();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        EXTERNAL_REQUESTS.with_label_values(&[kind, "success"]).inc();
        Ok(response)
    }
}

#[async_trait]
impl PackSource for KakaoClient {
    async fn fetch_metadata(&self, pack: &PackUrl) -> Result<PackMetadata, SourceError> {
        let url = pack.api_url(&self.base_url);

        debug!("Fetching pack metadata: token='{}', url={}", pack.token(), url);

        let response = self.get(&url, "store_metadata").await?;

        let metadata: MetadataResponse = response.json().await.map_err(|e| {
            SourceError::ParseError(format!("Failed to parse pack metadata: {}", e))
        })?;

        debug!(
            "Pack '{}' has {} images",
            metadata.result.title,
            metadata.result.len()
        );

        Ok(metadata.result)
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        debug!("Downloading image: {}", url);

        let response = self.get(url, "store_image").await?;
        let bytes = response.bytes().await?;

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = SourceConfig {
            base_url: "http://localhost:9000/".to_string(),
            timeout_secs: 5,
        };
        let client = KakaoClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");
    }
}
