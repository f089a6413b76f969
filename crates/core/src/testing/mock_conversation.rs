//! Mock chat conversation for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::chat::{ChatError, Conversation, MessageRef};

/// Something the pipeline did in the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Reply(String),
    Send { message_id: i32, text: String },
    Edit { message_id: i32, text: String },
}

/// Mock implementation of the Conversation trait.
///
/// Records every reply, message and edit. Message ids start at 1.
#[derive(Debug, Clone, Default)]
pub struct MockConversation {
    events: Arc<RwLock<Vec<ChatEvent>>>,
    next_id: Arc<RwLock<i32>>,
    fail_edits: Arc<RwLock<bool>>,
    /// Sends allowed to succeed before every further send fails.
    send_budget: Arc<RwLock<Option<usize>>>,
}

impl MockConversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every edit fail.
    pub async fn set_fail_edits(&self, fail: bool) {
        *self.fail_edits.write().await = fail;
    }

    /// Let the next `successful` sends through, then fail every send.
    ///
    /// Failed sends are not recorded as events.
    pub async fn fail_sends_after(&self, successful: usize) {
        *self.send_budget.write().await = Some(successful);
    }

    /// Get all recorded events, in order.
    pub async fn events(&self) -> Vec<ChatEvent> {
        self.events.read().await.clone()
    }

    /// Text of every reply, in order.
    pub async fn replies(&self) -> Vec<String> {
        self.events
            .read()
            .await
            .iter()
            .filter_map(|event| match event {
                ChatEvent::Reply(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Text of every new message, in order.
    pub async fn sent(&self) -> Vec<String> {
        self.events
            .read()
            .await
            .iter()
            .filter_map(|event| match event {
                ChatEvent::Send { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Text of every edit applied to `message_id`, in order.
    pub async fn edits_of(&self, message_id: i32) -> Vec<String> {
        self.events
            .read()
            .await
            .iter()
            .filter_map(|event| match event {
                ChatEvent::Edit {
                    message_id: id,
                    text,
                } if *id == message_id => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Id of the first message whose text starts with `prefix`.
    pub async fn message_id_starting_with(&self, prefix: &str) -> Option<i32> {
        self.events
            .read()
            .await
            .iter()
            .find_map(|event| match event {
                ChatEvent::Send { message_id, text } if text.starts_with(prefix) => {
                    Some(*message_id)
                }
                _ => None,
            })
    }
}

#[async_trait]
impl Conversation for MockConversation {
    async fn reply(&self, text: &str) -> Result<(), ChatError> {
        self.events
            .write()
            .await
            .push(ChatEvent::Reply(text.to_string()));
        Ok(())
    }

    async fn send(&self, text: &str) -> Result<MessageRef, ChatError> {
        if let Some(remaining) = self.send_budget.write().await.as_mut() {
            if *remaining == 0 {
                return Err(ChatError::Send("chat not found".to_string()));
            }
            *remaining -= 1;
        }

        let message_id = {
            let mut next = self.next_id.write().await;
            *next += 1;
            *next
        };
        self.events.write().await.push(ChatEvent::Send {
            message_id,
            text: text.to_string(),
        });
        Ok(MessageRef(message_id))
    }

    async fn edit(&self, message: MessageRef, text: &str) -> Result<(), ChatError> {
        if *self.fail_edits.read().await {
            return Err(ChatError::Edit {
                message_id: message.0,
                reason: "message is not modified".to_string(),
            });
        }
        self.events.write().await.push(ChatEvent::Edit {
            message_id: message.0,
            text: text.to_string(),
        });
        Ok(())
    }
}
