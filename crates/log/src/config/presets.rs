//! Configuration presets for common scenarios

use super::{Config, DisplayConfig, Format};

/// Level filter variable, checked before `RUST_LOG`
pub const ENV_LEVEL: &str = "RECYCLE_LOG";

/// Output format variable
pub const ENV_FORMAT: &str = "RECYCLE_LOG_FORMAT";

impl Config {
    /// Create configuration from environment variables
    ///
    /// Unknown format names fall back to compact output.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(level) = std::env::var(ENV_LEVEL) {
            config.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            config.level = level;
        }

        if let Ok(format) = std::env::var(ENV_FORMAT) {
            config.format = format.parse().unwrap_or(Format::Compact);
        }

        config.display.parse_env();
        config.service = std::env::var("RECYCLE_SERVICE").ok();

        config
    }

    /// Development configuration (pretty, debug level)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: Format::Pretty,
            display: DisplayConfig {
                colors: true,
                source: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Production configuration (JSON, info level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                source: false,
                flatten: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Test configuration (everything, no colors or timestamps)
    #[must_use]
    pub fn test() -> Self {
        Self {
            level: "trace".to_string(),
            format: Format::Compact,
            display: DisplayConfig {
                colors: false,
                time: false,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }
}
