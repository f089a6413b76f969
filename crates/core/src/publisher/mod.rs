//! Sticker set publishing.
//!
//! Wraps the chat platform's sticker set endpoints and generates set names
//! that satisfy the platform's naming rules.

mod bot_api;
mod naming;

pub use bot_api::BotApiPublisher;
pub use naming::{is_valid_set_name, SetNameGenerator, MAX_SET_NAME_LEN};

use async_trait::async_trait;
use thiserror::Error;

use crate::sticker::PreparedSticker;

/// Errors returned by a sticker publisher.
#[derive(Debug, Error)]
pub enum PublishError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The Bot API rejected the call.
    #[error("Bot API error: {code} - {description}")]
    ApiError { code: u16, description: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Failed to build the request payload.
    #[error("Failed to encode request: {0}")]
    EncodeError(String),
}

/// Creates sticker sets and appends stickers to them.
#[async_trait]
pub trait StickerPublisher: Send + Sync {
    /// Create a new set owned by `owner_id` seeded with `stickers`.
    async fn create_sticker_set(
        &self,
        owner_id: u64,
        name: &str,
        title: &str,
        stickers: &[PreparedSticker],
    ) -> Result<(), PublishError>;

    /// Append one sticker to an existing set.
    async fn add_sticker_to_set(
        &self,
        owner_id: u64,
        name: &str,
        sticker: &PreparedSticker,
    ) -> Result<(), PublishError>;
}
