//! # recycle-log
//!
//! Logging setup shared by recycle binaries and tests.
//!
//! Libraries in the workspace only emit `tracing` events; this crate installs
//! the subscriber that renders them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use recycle_log::{Config, Format};
//!
//! fn main() -> recycle_log::LogResult<()> {
//!     let _guard = recycle_log::init_with(Config::from_env().with_format(Format::Pretty))?;
//!
//!     recycle_log::info!(pools = 3, "scene ready");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

mod builder;
mod config;
mod error;

// Public API
pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, ENV_FORMAT, ENV_LEVEL, Format};
pub use error::{LogError, LogResult};

// Re-export tracing macros
pub use tracing::{debug, error, info, trace, warn};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{Config, Format, LogResult, auto_init, init, init_with};
    pub use crate::{debug, error, info, trace, warn};
}

// ============================================================================
// Initialization Functions
// ============================================================================

/// Pick a configuration from the environment and build type, then install it
///
/// An explicit `RECYCLE_LOG` or `RUST_LOG` wins; otherwise debug builds get
/// [`Config::development`] and release builds [`Config::production`].
pub fn auto_init() -> LogResult<LoggerGuard> {
    if std::env::var(ENV_LEVEL).is_ok() || std::env::var("RUST_LOG").is_ok() {
        init_with(Config::from_env())
    } else if cfg!(debug_assertions) {
        init_with(Config::development())
    } else {
        init_with(Config::production())
    }
}

/// Initialize with default configuration
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::default())
}

/// Initialize with custom configuration
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}
