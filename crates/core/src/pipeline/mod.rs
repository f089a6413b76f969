//! Pack-to-sticker-set pipeline.
//!
//! One request runs strictly in order:
//!
//! 1. validate the single `/create` argument
//! 2. fetch pack metadata
//! 3. announce the pack title
//! 4. download and resize every image, editing a `(i/N)` progress message
//! 5. create the set from the first image
//! 6. append the remaining images one at a time, editing a second progress message
//! 7. post the install link
//!
//! Nothing inside a request runs concurrently, which keeps both progress
//! counters monotonic.

pub mod messages;
mod orchestrator;
mod types;

pub use orchestrator::{PipelineError, StageCallback, StickerPipeline};
pub use types::{CreateRequest, CreatedSet, PipelineOutcome, PipelineStage};
