use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use tracing::debug;

use super::types::{PreparedSticker, StickerFormat};
use super::TransformError;
use crate::config::StickerConfig;

/// Scales store images onto the sticker canvas.
#[derive(Debug, Clone)]
pub struct StickerTransformer {
    canvas_size: u32,
    default_emoji: String,
}

impl StickerTransformer {
    pub fn new(config: &StickerConfig) -> Self {
        Self {
            canvas_size: config.canvas_size,
            default_emoji: config.default_emoji.clone(),
        }
    }

    pub fn canvas_size(&self) -> u32 {
        self.canvas_size
    }

    /// Decode `bytes`, stretch the whole source onto the canvas and encode as PNG.
    ///
    /// The scaled image is composited over a fully transparent canvas, so
    /// source alpha survives unchanged.
    pub fn prepare(&self, bytes: &[u8]) -> Result<PreparedSticker, TransformError> {
        let source = image::load_from_memory(bytes).map_err(TransformError::Decode)?;

        debug!(
            "Scaling {}x{} image to {}x{}",
            source.width(),
            source.height(),
            self.canvas_size,
            self.canvas_size
        );

        let scaled = imageops::resize(
            &source.to_rgba8(),
            self.canvas_size,
            self.canvas_size,
            FilterType::Triangle,
        );

        let mut canvas = RgbaImage::new(self.canvas_size, self.canvas_size);
        imageops::overlay(&mut canvas, &scaled, 0, 0);

        let mut buf = Cursor::new(Vec::new());
        canvas
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(TransformError::Encode)?;

        Ok(PreparedSticker {
            png: buf.into_inner(),
            size: self.canvas_size,
            emoji_list: vec![self.default_emoji.clone()],
            format: StickerFormat::Static,
        })
    }

    /// Run [`prepare`](Self::prepare) on the blocking thread pool.
    pub async fn prepare_blocking(&self, bytes: Vec<u8>) -> Result<PreparedSticker, TransformError> {
        let transformer = self.clone();
        tokio::task::spawn_blocking(move || transformer.prepare(&bytes))
            .await
            .map_err(|e| TransformError::Task(e.to_string()))?
    }
}
