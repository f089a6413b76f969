//! Conversation seam between the pipeline and the chat transport.
//!
//! The pipeline only needs to reply to the request, post new messages and
//! rewrite messages it posted earlier. Transports implement [`Conversation`]
//! for a single chat; a fresh value is created for every request.

use async_trait::async_trait;
use thiserror::Error;

/// Handle of a message the pipeline posted and may later edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef(pub i32);

/// Errors reported by a chat transport.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Failed to send message: {0}")]
    Send(String),

    #[error("Failed to edit message {message_id}: {reason}")]
    Edit { message_id: i32, reason: String },
}

/// One chat the pipeline reports to. All text is HTML formatted.
#[async_trait]
pub trait Conversation: Send + Sync {
    /// Reply to the message that triggered the request.
    async fn reply(&self, text: &str) -> Result<(), ChatError>;

    /// Post a new message to the chat.
    async fn send(&self, text: &str) -> Result<MessageRef, ChatError>;

    /// Replace the text of a previously posted message.
    async fn edit(&self, message: MessageRef, text: &str) -> Result<(), ChatError>;
}

/// Escape text for inclusion in an HTML formatted message.
pub use teloxide::utils::html::escape as escape_html;
