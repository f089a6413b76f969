pub mod chat;
pub mod config;
pub mod metrics;
pub mod pipeline;
pub mod publisher;
pub mod source;
pub mod sticker;
pub mod testing;

pub use chat::{escape_html, ChatError, Conversation, MessageRef};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    ServerConfig, SourceConfig, StickerConfig, TelegramConfig,
};
pub use pipeline::{
    CreateRequest, CreatedSet, PipelineError, PipelineOutcome, PipelineStage, StickerPipeline,
};
pub use publisher::{BotApiPublisher, PublishError, SetNameGenerator, StickerPublisher};
pub use source::{KakaoClient, PackMetadata, PackSource, PackUrl, SourceError};
pub use sticker::{PreparedSticker, StickerFormat, StickerTransformer, TransformError};
