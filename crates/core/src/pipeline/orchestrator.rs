//! Sticker pipeline implementation.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::messages;
use super::types::{CreateRequest, CreatedSet, PipelineOutcome, PipelineStage};
use crate::chat::{ChatError, Conversation, MessageRef};
use crate::metrics::{PACK_REQUESTS, PIPELINE_DURATION, STICKERS_PREPARED, STICKER_UPLOADS};
use crate::publisher::{PublishError, SetNameGenerator, StickerPublisher};
use crate::source::{PackMetadata, PackSource, PackUrl, SourceError};
use crate::sticker::{PreparedSticker, StickerTransformer, TransformError};

/// Error type for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Metadata or image download failed.
    #[error("Download failed: {0}")]
    Source(#[from] SourceError),

    /// An image could not be decoded or encoded.
    #[error("Image preparation failed: {0}")]
    Transform(#[from] TransformError),

    /// The sticker set could not be created.
    #[error("Sticker set creation failed: {0}")]
    Publish(#[from] PublishError),

    /// A progress message could not be posted.
    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),

    /// The pack lists no images, so there is nothing to seed the set with.
    #[error("Pack '{title}' contains no images")]
    EmptyPack { title: String },
}

/// Called on every stage transition of every request.
pub type StageCallback = Arc<dyn Fn(PipelineStage) + Send + Sync>;

/// Converts an emoticon pack into a sticker set, one request at a time.
///
/// A single pipeline value serves all chats. It holds no per-request state:
/// metadata, image buffers and progress message handles live on the stack of
/// [`run`](Self::run).
pub struct StickerPipeline<S, P>
where
    S: PackSource,
    P: StickerPublisher,
{
    source: S,
    publisher: P,
    transformer: StickerTransformer,
    names: SetNameGenerator,
    bot_username: String,
    stage_callback: Option<StageCallback>,
}

impl<S, P> StickerPipeline<S, P>
where
    S: PackSource,
    P: StickerPublisher,
{
    pub fn new(
        source: S,
        publisher: P,
        transformer: StickerTransformer,
        bot_username: impl Into<String>,
    ) -> Self {
        Self {
            source,
            publisher,
            transformer,
            names: SetNameGenerator::new(),
            bot_username: bot_username.into(),
            stage_callback: None,
        }
    }

    /// Set a callback that observes stage transitions.
    pub fn with_stage_callback(mut self, callback: StageCallback) -> Self {
        self.stage_callback = Some(callback);
        self
    }

    pub fn bot_username(&self) -> &str {
        &self.bot_username
    }

    /// Handle one `/create` request, reporting progress to `chat`.
    ///
    /// Invalid input is answered in the chat and returns
    /// [`PipelineOutcome::Rejected`]. Every other failure aborts the request
    /// and is returned; nothing beyond the progress messages already posted
    /// is shown to the user.
    pub async fn run(
        &self,
        request: &CreateRequest,
        chat: &dyn Conversation,
    ) -> Result<PipelineOutcome, PipelineError> {
        let started = Instant::now();
        let result = self.execute(request, chat).await;

        let label = match &result {
            Ok(outcome) => outcome.label(),
            Err(_) => {
                self.transition(PipelineStage::Failed);
                "failed"
            }
        };
        PACK_REQUESTS.with_label_values(&[label]).inc();
        PIPELINE_DURATION
            .with_label_values(&[label])
            .observe(started.elapsed().as_secs_f64());

        result
    }

    async fn execute(
        &self,
        request: &CreateRequest,
        chat: &dyn Conversation,
    ) -> Result<PipelineOutcome, PipelineError> {
        self.transition(PipelineStage::ValidatingInput);
        let pack = match parse_single_url(&request.args) {
            Some(pack) => pack,
            None => {
                debug!("Rejecting /create arguments: {:?}", request.args);
                chat.reply(messages::INVALID_URL).await?;
                return Ok(PipelineOutcome::Rejected);
            }
        };

        info!(
            "Converting pack: token={}, owner_id={}",
            pack.token(),
            request.owner_id
        );

        self.transition(PipelineStage::FetchingMetadata);
        chat.reply(messages::LOADING).await?;
        let metadata = self.source.fetch_metadata(&pack).await?;

        self.transition(PipelineStage::Announcing);
        chat.send(&messages::announce(&metadata.title)).await?;

        let stickers = self.prepare_stickers(&metadata, chat).await?;
        let created = self
            .publish(request.owner_id, &metadata.title, stickers, chat)
            .await?;

        chat.send(&messages::completed(
            &created.title,
            &created.name,
            created.failed_uploads.len(),
        ))
        .await?;

        self.transition(PipelineStage::Completed);
        info!(
            "Created sticker set: name={}, stickers={}, failed_uploads={}",
            created.name,
            created.sticker_count,
            created.failed_uploads.len()
        );

        Ok(PipelineOutcome::Completed(created))
    }

    /// Download and resize every image in pack order.
    async fn prepare_stickers(
        &self,
        metadata: &PackMetadata,
        chat: &dyn Conversation,
    ) -> Result<Vec<PreparedSticker>, PipelineError> {
        let total = metadata.len();
        self.transition(PipelineStage::PreparingImages { done: 0, total });

        let progress = chat.send(&messages::downloading(0, total)).await?;
        let mut stickers = Vec::with_capacity(total);

        for (index, url) in metadata.thumbnail_urls.iter().enumerate() {
            let bytes = self.source.fetch_image(url).await?;
            let sticker = self.transformer.prepare_blocking(bytes).await?;
            stickers.push(sticker);
            STICKERS_PREPARED.inc();

            let done = index + 1;
            self.transition(PipelineStage::PreparingImages { done, total });
            self.edit_progress(chat, progress, &messages::downloading(done, total))
                .await;
        }

        Ok(stickers)
    }

    /// Create the set from the first sticker, then append the rest.
    ///
    /// Failures of individual `add` calls are logged and collected but do not
    /// stop the loop. The result of the create call is only inspected once
    /// every remaining sticker has been submitted.
    async fn publish(
        &self,
        owner_id: u64,
        title: &str,
        stickers: Vec<PreparedSticker>,
        chat: &dyn Conversation,
    ) -> Result<CreatedSet, PipelineError> {
        self.transition(PipelineStage::CreatingSet);

        let total = stickers.len();
        let (first, rest) = stickers.split_first().ok_or_else(|| PipelineError::EmptyPack {
            title: title.to_string(),
        })?;

        chat.send(&messages::upload_total(total)).await?;
        let progress = chat.send(&messages::uploading(0, total)).await?;

        let set_name = self.names.next(&self.bot_username);
        debug!("Creating sticker set: name={}, title='{}'", set_name, title);

        let create_result = self
            .publisher
            .create_sticker_set(owner_id, &set_name, title, std::slice::from_ref(first))
            .await;
        record_upload(create_result.is_ok());
        self.edit_progress(chat, progress, &messages::uploading(1, total))
            .await;

        let mut failed_uploads = Vec::new();
        for (offset, sticker) in rest.iter().enumerate() {
            let done = offset + 2;
            self.transition(PipelineStage::UploadingRemaining { done, total });

            let result = self
                .publisher
                .add_sticker_to_set(owner_id, &set_name, sticker)
                .await;
            record_upload(result.is_ok());
            if let Err(e) = result {
                warn!(
                    "Failed to add sticker {}/{} to {}: {}",
                    done, total, set_name, e
                );
                failed_uploads.push(done);
            }

            self.edit_progress(chat, progress, &messages::uploading(done, total))
                .await;
        }

        create_result?;

        Ok(CreatedSet {
            link: messages::set_link(&set_name),
            name: set_name,
            title: title.to_string(),
            sticker_count: total,
            failed_uploads,
        })
    }

    async fn edit_progress(&self, chat: &dyn Conversation, message: MessageRef, text: &str) {
        if let Err(e) = chat.edit(message, text).await {
            warn!("Failed to update progress message: {}", e);
        }
    }

    fn transition(&self, stage: PipelineStage) {
        debug!("Pipeline stage: {}", stage);
        if let Some(callback) = &self.stage_callback {
            callback(stage);
        }
    }
}

/// Accept exactly one argument, and only if it is a pack URL.
fn parse_single_url(args: &[String]) -> Option<PackUrl> {
    match args {
        [arg] => PackUrl::parse(arg).ok(),
        _ => None,
    }
}

fn record_upload(success: bool) {
    let label = if success { "success" } else { "failed" };
    STICKER_UPLOADS.with_label_values(&[label]).inc();
}
