//! Mock emoticon store for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::source::{PackMetadata, PackSource, PackUrl, SourceError};

/// A recorded store request for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedFetch {
    Metadata { token: String },
    Image { url: String },
}

/// Mock implementation of the PackSource trait.
///
/// Packs and images are looked up by token and URL. Unknown tokens and URLs
/// answer like a store returning 404; registered failures answer with the
/// configured status.
#[derive(Debug, Clone, Default)]
pub struct MockPackSource {
    packs: Arc<RwLock<HashMap<String, PackMetadata>>>,
    images: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    metadata_failures: Arc<RwLock<HashMap<String, u16>>>,
    failing_images: Arc<RwLock<HashSet<String>>>,
    fetches: Arc<RwLock<Vec<RecordedFetch>>>,
}

impl MockPackSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register metadata for a pack token.
    pub async fn add_pack(&self, token: &str, metadata: PackMetadata) {
        self.packs.write().await.insert(token.to_string(), metadata);
    }

    /// Register image bytes for a URL.
    pub async fn add_image(&self, url: &str, bytes: Vec<u8>) {
        self.images.write().await.insert(url.to_string(), bytes);
    }

    /// Make metadata requests for `token` fail with an HTTP status.
    pub async fn fail_metadata(&self, token: &str, status: u16) {
        self.metadata_failures
            .write()
            .await
            .insert(token.to_string(), status);
    }

    /// Make downloads of `url` fail with HTTP 500.
    pub async fn fail_image(&self, url: &str) {
        self.failing_images.write().await.insert(url.to_string());
    }

    /// Get all recorded requests, in order.
    pub async fn recorded_fetches(&self) -> Vec<RecordedFetch> {
        self.fetches.read().await.clone()
    }

    /// Number of requests of any kind.
    pub async fn fetch_count(&self) -> usize {
        self.fetches.read().await.len()
    }
}

#[async_trait]
impl PackSource for MockPackSource {
    async fn fetch_metadata(&self, pack: &PackUrl) -> Result<PackMetadata, SourceError> {
        self.fetches.write().await.push(RecordedFetch::Metadata {
            token: pack.token().to_string(),
        });

        if let Some(status) = self.metadata_failures.read().await.get(pack.token()) {
            return Err(SourceError::ApiError {
                status: *status,
                message: "mock failure".to_string(),
            });
        }

        self.packs
            .read()
            .await
            .get(pack.token())
            .cloned()
            .ok_or_else(|| SourceError::ApiError {
                status: 404,
                message: format!("unknown pack {}", pack.token()),
            })
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        self.fetches.write().await.push(RecordedFetch::Image {
            url: url.to_string(),
        });

        if self.failing_images.read().await.contains(url) {
            return Err(SourceError::ApiError {
                status: 500,
                message: "mock failure".to_string(),
            });
        }

        self.images
            .read()
            .await
            .get(url)
            .cloned()
            .ok_or_else(|| SourceError::ApiError {
                status: 404,
                message: format!("unknown image {}", url),
            })
    }
}
