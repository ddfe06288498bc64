//! Logger builder implementation
//!
//! `format` holds the layer creation macros; this module assembles
//! `Registry + EnvFilter + fmt layer` and installs it globally.

#[macro_use]
mod format;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::{Config, Format};
use crate::error::{LogError, LogResult};

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Guard that keeps the logger's root span entered
///
/// Drop it at the end of `main`; events logged after that lose the
/// `service` field.
#[derive(Debug)]
pub struct LoggerGuard {
    _root_span: Option<tracing::span::EnteredSpan>,
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Validate the level filter without installing anything
    pub fn filter(&self) -> LogResult<EnvFilter> {
        EnvFilter::try_new(&self.config.level)
            .map_err(|e| LogError::filter(&self.config.level, e))
    }

    /// Build and install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Filter string cannot be parsed
    /// - A global subscriber is already installed
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = self.filter()?;
        let display = &self.config.display;

        let fmt_layer = match self.config.format {
            Format::Pretty => create_fmt_layer!(pretty, display),
            Format::Compact => create_fmt_layer!(compact, display),
            Format::Json => create_json_layer!(display),
        };

        Registry::default()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(LogError::init)?;

        let root_span = self
            .config
            .service
            .as_deref()
            .map(|service| tracing::info_span!("app", service).entered());

        tracing::debug!(
            level = %self.config.level,
            format = %self.config.format,
            "logger initialized"
        );

        Ok(LoggerGuard {
            _root_span: root_span,
        })
    }
}
