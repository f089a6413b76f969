//! Command table and update handler tree.

use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, ReplyParameters};
use teloxide::utils::command::BotCommands;
use tracing::{debug, warn};

use kakaogram_core::pipeline::messages;
use kakaogram_core::{BotApiPublisher, CreateRequest, KakaoClient, StickerPipeline};

use crate::chat::TelegramConversation;
use crate::metrics::{InFlightGuard, COMMANDS_RECEIVED};

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type HandlerResult = Result<(), HandlerError>;

/// Pipeline wired to the real store and Bot API.
pub type BotPipeline = StickerPipeline<KakaoClient, BotApiPublisher>;

/// Dependencies injected into every handler.
#[derive(Clone)]
pub struct HandlerDeps {
    pub pipeline: Arc<BotPipeline>,
}

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "지원하는 명령어:")]
pub enum Command {
    #[command(description = "사용법 안내")]
    Start,
    #[command(description = "사용법 안내")]
    Help,
    #[command(description = "이모티콘 URL로 스티커 세트 만들기")]
    Create(String),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::Create(_) => "create",
        }
    }
}

/// Handler tree: command messages go to [`answer`], everything else is ignored.
pub fn schema() -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter_command::<Command>()
        .endpoint(answer)
}

async fn answer(bot: Bot, msg: Message, cmd: Command, deps: HandlerDeps) -> HandlerResult {
    COMMANDS_RECEIVED.with_label_values(&[cmd.name()]).inc();

    match cmd {
        Command::Start | Command::Help => usage(&bot, &msg).await,
        Command::Create(args) => create(&bot, &msg, &args, &deps).await,
    }
}

async fn usage(bot: &Bot, msg: &Message) -> HandlerResult {
    bot.send_message(msg.chat.id, messages::USAGE)
        .parse_mode(ParseMode::Html)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}

async fn create(bot: &Bot, msg: &Message, args: &str, deps: &HandlerDeps) -> HandlerResult {
    let Some(owner) = msg.from.as_ref() else {
        warn!("Ignoring /create without a sender in chat {}", msg.chat.id);
        return Ok(());
    };

    let request = CreateRequest::from_text(owner.id.0, args);
    let chat = TelegramConversation::new(bot.clone(), msg.chat.id, msg.id);

    let result = {
        let _in_flight = InFlightGuard::acquire();
        deps.pipeline.run(&request, &chat).await
    };

    let outcome = result?;
    debug!(
        "/create in chat {} finished: {}",
        msg.chat.id,
        outcome.label()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT: &str = "kakaogram_bot";

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("/start", BOT).unwrap(), Command::Start);
        assert_eq!(Command::parse("/help", BOT).unwrap(), Command::Help);
        assert_eq!(
            Command::parse(&format!("/help@{}", BOT), BOT).unwrap(),
            Command::Help
        );
    }

    #[test]
    fn test_create_keeps_raw_arguments() {
        let cmd = Command::parse("/create https://e.kakao.com/t/abc123", BOT).unwrap();
        assert_eq!(
            cmd,
            Command::Create("https://e.kakao.com/t/abc123".to_string())
        );

        let cmd = Command::parse("/create a b", BOT).unwrap();
        match cmd {
            Command::Create(args) => {
                assert_eq!(CreateRequest::from_text(1, &args).args.len(), 2)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_create_without_arguments() {
        let cmd = Command::parse("/create", BOT).unwrap();
        match cmd {
            Command::Create(args) => assert!(CreateRequest::from_text(1, &args).args.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_command_is_not_parsed() {
        assert!(Command::parse("/source", BOT).is_err());
    }

    #[test]
    fn test_command_names() {
        assert_eq!(Command::Create(String::new()).name(), "create");
        assert_eq!(Command::Start.name(), "start");
    }
}
