//! Types for the sticker pipeline.

use std::fmt;

/// A `/create` request as received from the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    /// Chat platform user that will own the new set.
    pub owner_id: u64,
    /// Command arguments, without the command itself.
    pub args: Vec<String>,
}

impl CreateRequest {
    pub fn new(owner_id: u64, args: Vec<String>) -> Self {
        Self { owner_id, args }
    }

    /// Build a request from the raw text following the command.
    pub fn from_text(owner_id: u64, text: &str) -> Self {
        Self {
            owner_id,
            args: text.split_whitespace().map(str::to_string).collect(),
        }
    }
}

/// Stage a request is in. Stages only ever advance in declaration order,
/// except that any stage may jump to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    ValidatingInput,
    FetchingMetadata,
    Announcing,
    PreparingImages { done: usize, total: usize },
    CreatingSet,
    UploadingRemaining { done: usize, total: usize },
    Completed,
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::ValidatingInput => write!(f, "validating_input"),
            PipelineStage::FetchingMetadata => write!(f, "fetching_metadata"),
            PipelineStage::Announcing => write!(f, "announcing"),
            PipelineStage::PreparingImages { done, total } => {
                write!(f, "preparing_images({}/{})", done, total)
            }
            PipelineStage::CreatingSet => write!(f, "creating_set"),
            PipelineStage::UploadingRemaining { done, total } => {
                write!(f, "uploading_remaining({}/{})", done, total)
            }
            PipelineStage::Completed => write!(f, "completed"),
            PipelineStage::Failed => write!(f, "failed"),
        }
    }
}

/// A sticker set that was created for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSet {
    /// Platform-wide unique set name.
    pub name: String,
    /// Display title (the pack title).
    pub title: String,
    /// Deep link that installs the set.
    pub link: String,
    /// Number of stickers that were prepared and submitted.
    pub sticker_count: usize,
    /// 1-based positions of stickers whose `addStickerToSet` call failed.
    pub failed_uploads: Vec<usize>,
}

/// How a request ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The argument was not a single pack URL; the user was told so.
    Rejected,
    /// The set was created.
    Completed(CreatedSet),
}

impl PipelineOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            PipelineOutcome::Rejected => "rejected",
            PipelineOutcome::Completed(_) => "completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_splits_arguments() {
        let request = CreateRequest::from_text(7, "  https://e.kakao.com/t/a   extra ");
        assert_eq!(request.owner_id, 7);
        assert_eq!(request.args, vec!["https://e.kakao.com/t/a", "extra"]);

        assert!(CreateRequest::from_text(7, "   ").args.is_empty());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(
            PipelineStage::PreparingImages { done: 1, total: 3 }.to_string(),
            "preparing_images(1/3)"
        );
        assert_eq!(PipelineStage::CreatingSet.to_string(), "creating_set");
    }
}
