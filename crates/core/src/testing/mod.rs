//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of every external collaborator
//! of the pipeline, allowing end-to-end testing without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use kakaogram_core::testing::{fixtures, MockConversation, MockPackSource, MockPublisher};
//!
//! let source = MockPackSource::new();
//! source.add_pack("abc123", fixtures::pack_metadata("Foo", &["u1", "u2"])).await;
//! source.add_image("u1", fixtures::png_image(100, 100, [255, 0, 0, 255])).await;
//!
//! let publisher = MockPublisher::new();
//! let chat = MockConversation::new();
//! // Build a StickerPipeline with clones of the mocks, run it, then inspect
//! // publisher.recorded_calls() and chat.events().
//! ```

mod mock_conversation;
mod mock_publisher;
mod mock_source;

pub use mock_conversation::{ChatEvent, MockConversation};
pub use mock_publisher::{MockPublisher, RecordedPublish};
pub use mock_source::{MockPackSource, RecordedFetch};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    use crate::source::PackMetadata;
    use crate::sticker::{PreparedSticker, StickerFormat};

    /// Encode a solid-color PNG of the given size.
    pub fn png_image(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba(color));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    /// Encode a gradient JPEG of the given size.
    pub fn jpeg_image(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Jpeg)
            .unwrap();
        buf.into_inner()
    }

    /// Pack metadata with the given title and image URLs.
    pub fn pack_metadata(title: &str, urls: &[&str]) -> PackMetadata {
        PackMetadata {
            title: title.to_string(),
            thumbnail_urls: urls.iter().map(|u| u.to_string()).collect(),
        }
    }

    /// Metadata API body as the store serves it.
    pub fn metadata_json(title: &str, urls: &[&str]) -> String {
        serde_json::json!({
            "result": {
                "title": title,
                "thumbnailUrls": urls,
            }
        })
        .to_string()
    }

    /// A small prepared sticker for publisher tests.
    pub fn prepared_sticker() -> PreparedSticker {
        PreparedSticker {
            png: png_image(8, 8, [0, 255, 0, 255]),
            size: 8,
            emoji_list: vec!["😀".to_string()],
            format: StickerFormat::Static,
        }
    }
}
