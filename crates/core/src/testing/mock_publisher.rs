//! Mock sticker publisher for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::publisher::{PublishError, StickerPublisher};
use crate::sticker::PreparedSticker;

/// A recorded publisher call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedPublish {
    CreateSet {
        owner_id: u64,
        name: String,
        title: String,
        stickers: Vec<PreparedSticker>,
        success: bool,
    },
    AddSticker {
        owner_id: u64,
        name: String,
        sticker: PreparedSticker,
        success: bool,
    },
}

/// Mock implementation of the StickerPublisher trait.
///
/// Provides controllable behavior for testing:
/// - Track every create/add call in order
/// - Fail set creation
/// - Fail individual add calls by their 0-based call index
#[derive(Debug, Clone, Default)]
pub struct MockPublisher {
    calls: Arc<RwLock<Vec<RecordedPublish>>>,
    create_failure: Arc<RwLock<Option<(u16, String)>>>,
    failing_adds: Arc<RwLock<HashSet<usize>>>,
    add_count: Arc<RwLock<usize>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create_sticker_set` fail with a Bot API error.
    pub async fn fail_create(&self, code: u16, description: &str) {
        *self.create_failure.write().await = Some((code, description.to_string()));
    }

    /// Make the `index`-th (0-based) `add_sticker_to_set` call fail.
    pub async fn fail_add(&self, index: usize) {
        self.failing_adds.write().await.insert(index);
    }

    /// Get all recorded calls, in order.
    pub async fn recorded_calls(&self) -> Vec<RecordedPublish> {
        self.calls.read().await.clone()
    }

    /// Names of every set passed to `create_sticker_set`.
    pub async fn created_set_names(&self) -> Vec<String> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|call| match call {
                RecordedPublish::CreateSet { name, .. } => Some(name.clone()),
                RecordedPublish::AddSticker { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl StickerPublisher for MockPublisher {
    async fn create_sticker_set(
        &self,
        owner_id: u64,
        name: &str,
        title: &str,
        stickers: &[PreparedSticker],
    ) -> Result<(), PublishError> {
        let failure = self.create_failure.read().await.clone();

        self.calls.write().await.push(RecordedPublish::CreateSet {
            owner_id,
            name: name.to_string(),
            title: title.to_string(),
            stickers: stickers.to_vec(),
            success: failure.is_none(),
        });

        match failure {
            Some((code, description)) => Err(PublishError::ApiError { code, description }),
            None => Ok(()),
        }
    }

    async fn add_sticker_to_set(
        &self,
        owner_id: u64,
        name: &str,
        sticker: &PreparedSticker,
    ) -> Result<(), PublishError> {
        let index = {
            let mut count = self.add_count.write().await;
            let index = *count;
            *count += 1;
            index
        };
        let fails = self.failing_adds.read().await.contains(&index);

        self.calls.write().await.push(RecordedPublish::AddSticker {
            owner_id,
            name: name.to_string(),
            sticker: sticker.clone(),
            success: !fails,
        });

        if fails {
            return Err(PublishError::ApiError {
                code: 400,
                description: "Bad Request: STICKERSET_INVALID".to_string(),
            });
        }
        Ok(())
    }
}
