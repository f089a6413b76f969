//! Sticker image preparation.
//!
//! Store images come in arbitrary sizes and formats. The chat platform wants
//! a PNG that fits a fixed square canvas, so every image is decoded, scaled
//! onto the canvas with a bilinear filter and re-encoded.

mod transform;
mod types;

pub use transform::StickerTransformer;
pub use types::{PreparedSticker, StickerFormat};

use thiserror::Error;

/// Errors that can occur while preparing a sticker image.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The downloaded bytes are not a recognizable raster image.
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// The scaled image could not be encoded.
    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    /// The blocking worker running the transform panicked or was cancelled.
    #[error("Transform task failed: {0}")]
    Task(String),
}
