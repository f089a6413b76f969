//! Telegram-backed conversation.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{MessageId, ParseMode, ReplyParameters};

use kakaogram_core::{ChatError, Conversation, MessageRef};

/// The chat a `/create` command came from.
pub struct TelegramConversation {
    bot: Bot,
    chat_id: ChatId,
    request_id: MessageId,
}

impl TelegramConversation {
    pub fn new(bot: Bot, chat_id: ChatId, request_id: MessageId) -> Self {
        Self {
            bot,
            chat_id,
            request_id,
        }
    }
}

#[async_trait]
impl Conversation for TelegramConversation {
    async fn reply(&self, text: &str) -> Result<(), ChatError> {
        self.bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::Html)
            .reply_parameters(ReplyParameters::new(self.request_id))
            .await
            .map(|_| ())
            .map_err(|e| ChatError::Send(e.to_string()))
    }

    async fn send(&self, text: &str) -> Result<MessageRef, ChatError> {
        let message = self
            .bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|e| ChatError::Send(e.to_string()))?;

        Ok(MessageRef(message.id.0))
    }

    async fn edit(&self, message: MessageRef, text: &str) -> Result<(), ChatError> {
        self.bot
            .edit_message_text(self.chat_id, MessageId(message.0), text)
            .parse_mode(ParseMode::Html)
            .await
            .map(|_| ())
            .map_err(|e| ChatError::Edit {
                message_id: message.0,
                reason: e.to_string(),
            })
    }
}
