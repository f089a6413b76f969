//! Emoticon store integration.
//!
//! Resolves a web store pack URL into [`PackMetadata`] and downloads the
//! individual pack images.

mod kakao;
mod types;

pub use kakao::KakaoClient;
pub use types::{PackMetadata, PackUrl, API_PATH_PREFIX, PACK_PATH_PREFIX};

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the emoticon store.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The argument is not a pack URL.
    #[error("Not a valid emoticon pack URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Source of pack metadata and image bytes.
#[async_trait]
pub trait PackSource: Send + Sync {
    /// Fetch title and image links for a pack.
    async fn fetch_metadata(&self, pack: &PackUrl) -> Result<PackMetadata, SourceError>;

    /// Download one image.
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, SourceError>;
}
