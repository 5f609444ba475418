//! Environment-based configuration for the narrative pipeline core.

pub mod error;
pub mod settings;

pub use error::{ConfigError, ConfigResult};
pub use settings::Settings;
