use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;
use tracing::debug;

use super::{types::Config, ConfigError};

/// Environment variable carrying the bot credential.
pub const TOKEN_ENV: &str = "TELEGRAM_TOKEN";

/// Load configuration from an optional TOML file with environment overrides.
///
/// Precedence, lowest first: built-in defaults, the file at `path` (skipped
/// when it does not exist), `KAKAOGRAM_`-prefixed variables using `__` as
/// the section separator, and finally `TELEGRAM_TOKEN`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let mut figment = Figment::new();

    if path.exists() {
        figment = figment.merge(Toml::file(path));
    } else {
        debug!("No config file at {:?}, using defaults", path);
    }

    let config: Config = figment
        .merge(Env::prefixed("KAKAOGRAM_").split("__"))
        .merge(Env::raw().only(&[TOKEN_ENV]).map(|_| "telegram.token".into()))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
