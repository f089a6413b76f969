use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub sticker: StickerConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Chat platform configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramConfig {
    /// Bot credential. Normally injected from `TELEGRAM_TOKEN`.
    #[serde(default)]
    pub token: String,
    /// Bot API base URL (default: https://api.telegram.org)
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Timeout for every Bot API request, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Long-polling timeout passed to getUpdates, in seconds
    #[serde(default = "default_polling_timeout")]
    pub polling_timeout_secs: u64,
    /// Skip updates that queued up while the bot was offline
    #[serde(default = "default_true")]
    pub drop_pending_updates: bool,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
            polling_timeout_secs: default_polling_timeout(),
            drop_pending_updates: true,
        }
    }
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_polling_timeout() -> u64 {
    9
}

fn default_true() -> bool {
    true
}

/// Emoticon store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Store base URL. Pack URLs and the metadata API both live under it.
    #[serde(default = "default_source_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_source_timeout")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_source_url(),
            timeout_secs: default_source_timeout(),
        }
    }
}

fn default_source_url() -> String {
    "https://e.kakao.com".to_string()
}

fn default_source_timeout() -> u64 {
    30
}

/// Sticker rendering configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StickerConfig {
    /// Side of the square output canvas in pixels
    #[serde(default = "default_canvas_size")]
    pub canvas_size: u32,
    /// Emoji attached to every sticker (the store provides none)
    #[serde(default = "default_emoji")]
    pub default_emoji: String,
}

impl Default for StickerConfig {
    fn default() -> Self {
        Self {
            canvas_size: default_canvas_size(),
            default_emoji: default_emoji(),
        }
    }
}

fn default_canvas_size() -> u32 {
    512
}

fn default_emoji() -> String {
    "😀".to_string()
}

/// Status server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Sanitized config for API responses (credential redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub telegram: SanitizedTelegramConfig,
    pub source: SourceConfig,
    pub sticker: StickerConfig,
    pub server: ServerConfig,
}

/// Sanitized Telegram config (token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTelegramConfig {
    pub token_configured: bool,
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub polling_timeout_secs: u64,
    pub drop_pending_updates: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            telegram: SanitizedTelegramConfig {
                token_configured: !config.telegram.token.is_empty(),
                api_url: config.telegram.api_url.clone(),
                request_timeout_secs: config.telegram.request_timeout_secs,
                polling_timeout_secs: config.telegram.polling_timeout_secs,
                drop_pending_updates: config.telegram.drop_pending_updates,
            },
            source: config.source.clone(),
            sticker: config.sticker.clone(),
            server: config.server.clone(),
        }
    }
}
