use serde::{Deserialize, Serialize};

/// Sticker encoding accepted by the chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StickerFormat {
    Static,
    Animated,
    Video,
}

impl StickerFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            StickerFormat::Static => "static",
            StickerFormat::Animated => "animated",
            StickerFormat::Video => "video",
        }
    }
}

/// A sticker ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSticker {
    /// PNG-encoded square image.
    pub png: Vec<u8>,
    /// Side of the square canvas in pixels.
    pub size: u32,
    /// Emoji the sticker is associated with.
    pub emoji_list: Vec<String>,
    pub format: StickerFormat,
}
