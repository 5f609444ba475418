//! Configuration loading errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(String),

    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
