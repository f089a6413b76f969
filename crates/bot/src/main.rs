use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kakaogram_bot::api::create_router;
use kakaogram_bot::commands::{schema, Command, HandlerDeps};
use kakaogram_bot::state::AppState;
use kakaogram_core::{
    load_config, validate_config, BotApiPublisher, Config, KakaoClient, StickerPipeline,
    StickerTransformer,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("KAKAOGRAM_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("kakaogram.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    info!("Starting kakaogram v{}", VERSION);
    info!("Sticker source: {}", config.source.base_url);

    let bot = create_bot(&config)?;
    let me = bot.get_me().await.context("Failed to reach the Bot API")?;
    let bot_username = me.username().to_string();
    info!("{} has been started", bot_username);

    let source = KakaoClient::new(&config.source).context("Failed to create store client")?;
    let publisher =
        BotApiPublisher::new(&config.telegram).context("Failed to create sticker publisher")?;
    let transformer = StickerTransformer::new(&config.sticker);
    let pipeline = Arc::new(StickerPipeline::new(
        source,
        publisher,
        transformer,
        bot_username.clone(),
    ));

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register command list: {}", e);
    }

    if config.server.enabled {
        spawn_status_server(&config, &bot_username).await?;
    }

    let mut polling = Polling::builder(bot.clone())
        .timeout(Duration::from_secs(config.telegram.polling_timeout_secs));
    if config.telegram.drop_pending_updates {
        polling = polling.drop_pending_updates();
    }
    let listener = polling.build();

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![HandlerDeps { pipeline }])
        .default_handler(|_| async {})
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error from the update handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    info!("Bot stopped");
    Ok(())
}

fn create_bot(config: &Config) -> Result<Bot> {
    let client = teloxide::net::default_reqwest_settings()
        .timeout(Duration::from_secs(config.telegram.request_timeout_secs))
        .build()
        .context("Failed to build Bot API client")?;
    let api_url = config
        .telegram
        .api_url
        .parse()
        .with_context(|| format!("Invalid Bot API URL: {}", config.telegram.api_url))?;

    Ok(Bot::with_client(&config.telegram.token, client).set_api_url(api_url))
}

async fn spawn_status_server(config: &Config, bot_username: &str) -> Result<()> {
    let state = Arc::new(AppState::new(config.clone(), bot_username));
    let app = create_router(state);

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Status server listening on {}", addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Status server error: {}", e);
        }
    });

    Ok(())
}
