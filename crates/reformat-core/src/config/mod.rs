//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod conversion;
pub mod logging;
pub mod server;

use serde::{Deserialize, Serialize};

pub use self::conversion::ConversionConfig;
pub use self::logging::LoggingConfig;
pub use self::server::{CorsConfig, ServerConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration file and environment overlay. It is read-only after
/// startup and shared across requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Conversion pipeline settings.
    #[serde(default)]
    pub conversion: ConversionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` (if present) with environment variables
    /// prefixed with `REFORMAT__` (e.g. `REFORMAT__SERVER__PORT=9000`).
    pub fn load() -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("REFORMAT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
