mod loader;
mod types;
mod validate;

pub use loader::{load_config, load_config_from_str, TOKEN_ENV};
pub use types::*;
pub use validate::{validate_config, MAX_CANVAS_SIZE};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing bot credential: set the {0} environment variable")]
    MissingCredential(&'static str),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
