use super::{loader::TOKEN_ENV, types::Config, ConfigError};

/// Largest side the chat platform accepts for static stickers.
pub const MAX_CANVAS_SIZE: u32 = 512;

/// Validate configuration
/// Currently validates:
/// - The bot credential is present
/// - Canvas size is within 1..=512
/// - Timeouts are non-zero
/// - A default emoji is configured
/// - Server port is not 0 when the status server is enabled
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.telegram.token.trim().is_empty() {
        return Err(ConfigError::MissingCredential(TOKEN_ENV));
    }

    if config.sticker.canvas_size == 0 || config.sticker.canvas_size > MAX_CANVAS_SIZE {
        return Err(ConfigError::ValidationError(format!(
            "sticker.canvas_size must be between 1 and {}, got {}",
            MAX_CANVAS_SIZE, config.sticker.canvas_size
        )));
    }

    if config.sticker.default_emoji.is_empty() {
        return Err(ConfigError::ValidationError(
            "sticker.default_emoji cannot be empty".to_string(),
        ));
    }

    if config.source.timeout_secs == 0 || config.telegram.request_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "request timeouts cannot be 0".to_string(),
        ));
    }

    if config.server.enabled && config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    Ok(())
}
