use kakaogram_core::{Config, SanitizedConfig};

/// Shared state of the status server
pub struct AppState {
    config: Config,
    bot_username: String,
}

impl AppState {
    pub fn new(config: Config, bot_username: impl Into<String>) -> Self {
        Self {
            config,
            bot_username: bot_username.into(),
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn bot_username(&self) -> &str {
        &self.bot_username
    }
}
