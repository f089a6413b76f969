//! Telegram Bot API sticker endpoints.
//!
//! Stickers are uploaded as multipart attachments and referenced from the
//! JSON `InputSticker` objects via `attach://<part>`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{PublishError, StickerPublisher};
use crate::config::TelegramConfig;
use crate::metrics::EXTERNAL_REQUESTS;
use crate::sticker::PreparedSticker;

/// Sticker publisher backed by the Bot API HTTP interface.
pub struct BotApiPublisher {
    client: Client,
    /// `<api_url>/bot<token>`; never logged.
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct InputStickerPayload<'a> {
    sticker: String,
    format: &'static str,
    emoji_list: &'a [String],
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<u16>,
}

impl BotApiPublisher {
    pub fn new(config: &TelegramConfig) -> Result<Self, PublishError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/bot{}",
                config.api_url.trim_end_matches('/'),
                config.token
            ),
        })
    }

    fn attach(
        form: Form,
        index: usize,
        sticker: &PreparedSticker,
    ) -> Result<(Form, InputStickerPayload<'_>), PublishError> {
        let part_name = format!("sticker{}", index);
        let part = Part::bytes(sticker.png.clone())
            .file_name(format!("{}.png", part_name))
            .mime_str("image/png")
            .map_err(|e| PublishError::EncodeError(e.to_string()))?;

        let payload = InputStickerPayload {
            sticker: format!("attach://{}", part_name),
            format: sticker.format.as_str(),
            emoji_list: &sticker.emoji_list,
        };

        Ok((form.part(part_name, part), payload))
    }

    async fn call(&self, method: &str, form: Form) -> Result<(), PublishError> {
        let url = format!("{}/{}", self.endpoint, method);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                EXTERNAL_REQUESTS
                    .with_label_values(&["bot_api", "error"])
                    .inc();
                PublishError::HttpError(e.without_url())
            })?;

        let status = response.status();
        let body: ApiResponse = response.json().await.map_err(|e| {
            EXTERNAL_REQUESTS
                .with_label_values(&["bot_api", "error"])
                .inc();
            PublishError::ParseError(format!(
                "Failed to parse {} response (HTTP {}): {}",
                method,
                status.as_u16(),
                e.without_url()
            ))
        })?;

        if !body.ok {
            EXTERNAL_REQUESTS
                .with_label_values(&["bot_api", "error"])
                .inc();
            return Err(PublishError::ApiError {
                code: body.error_code.unwrap_or(status.as_u16()),
                description: body.description.unwrap_or_default(),
            });
        }

        EXTERNAL_REQUESTS
            .with_label_values(&["bot_api", "success"])
            .inc();
        Ok(())
    }
}

#[async_trait]
impl StickerPublisher for BotApiPublisher {
    async fn create_sticker_set(
        &self,
        owner_id: u64,
        name: &str,
        title: &str,
        stickers: &[PreparedSticker],
    ) -> Result<(), PublishError> {
        debug!(
            "createNewStickerSet: name={}, title='{}', stickers={}",
            name,
            title,
            stickers.len()
        );

        let mut form = Form::new()
            .text("user_id", owner_id.to_string())
            .text("name", name.to_string())
            .text("title", title.to_string())
            .text("sticker_type", "regular");

        let mut payloads = Vec::with_capacity(stickers.len());
        for (index, sticker) in stickers.iter().enumerate() {
            let (next, payload) = Self::attach(form, index, sticker)?;
            form = next;
            payloads.push(payload);
        }

        let stickers_json = serde_json::to_string(&payloads)
            .map_err(|e| PublishError::EncodeError(e.to_string()))?;
        form = form.text("stickers", stickers_json);

        self.call("createNewStickerSet", form).await
    }

    async fn add_sticker_to_set(
        &self,
        owner_id: u64,
        name: &str,
        sticker: &PreparedSticker,
    ) -> Result<(), PublishError> {
        debug!("addStickerToSet: name={}", name);

        let form = Form::new()
            .text("user_id", owner_id.to_string())
            .text("name", name.to_string());

        let (form, payload) = Self::attach(form, 0, sticker)?;
        let sticker_json = serde_json::to_string(&payload)
            .map_err(|e| PublishError::EncodeError(e.to_string()))?;

        self.call("addStickerToSet", form.text("sticker", sticker_json))
            .await
    }
}
