//! Display configuration

use serde::{Deserialize, Serialize};

/// Display configuration
///
/// Independent toggles, each mapping to one formatter option.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show timestamps
    pub time: bool,
    /// Show source location (`file:line`)
    pub source: bool,
    /// Show target module
    pub target: bool,
    /// Show thread IDs
    pub thread_ids: bool,
    /// Show thread names
    pub thread_names: bool,
    /// Use ANSI colors
    pub colors: bool,
    /// Show span list in JSON
    pub span_list: bool,
    /// Flatten JSON events
    pub flatten: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time: true,
            source: cfg!(debug_assertions),
            target: true,
            thread_ids: false,
            thread_names: false,
            colors: std::io::IsTerminal::is_terminal(&std::io::stderr()),
            span_list: true,
            flatten: true,
        }
    }
}

impl DisplayConfig {
    /// Apply `RECYCLE_LOG_TIME`, `RECYCLE_LOG_SOURCE` and `RECYCLE_LOG_COLORS`
    pub(super) fn parse_env(&mut self) {
        if let Ok(v) = std::env::var("RECYCLE_LOG_TIME") {
            self.time = is_enabled(&v);
        }
        if let Ok(v) = std::env::var("RECYCLE_LOG_SOURCE") {
            self.source = is_enabled(&v);
        }
        if let Ok(v) = std::env::var("RECYCLE_LOG_COLORS") {
            self.colors = is_enabled(&v);
        }
    }
}

fn is_enabled(value: &str) -> bool {
    value != "0" && value != "false"
}
