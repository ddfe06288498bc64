//! Pool configuration

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PoolError, PoolResult};

/// Environment variable overriding [`PoolConfig::release_check`]
pub const ENV_RELEASE_CHECK: &str = "RECYCLE_POOL_RELEASE_CHECK";

/// Environment variable overriding [`PoolConfig::grow_on_demand`]
pub const ENV_GROW_ON_DEMAND: &str = "RECYCLE_POOL_GROW_ON_DEMAND";

/// How a pool vets elements handed back to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseCheck {
    /// Refuse elements already queued and elements another pool created
    ///
    /// Elements are identified by [`EntityId`](crate::EntityId) alone, and ids
    /// are only unique within one scene. Pools whose elements may cross over
    /// must share one scene, or an element from another scene that happens to
    /// carry an id this pool issued is accepted as its own.
    #[default]
    Strict,
    /// Queue whatever comes back, duplicates included
    Lenient,
}

impl fmt::Display for ReleaseCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::Lenient => f.write_str("lenient"),
        }
    }
}

impl FromStr for ReleaseCheck {
    type Err = PoolError;

    fn from_str(s: &str) -> PoolResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(PoolError::invalid_config(format!(
                "unknown release check '{other}' (expected 'strict' or 'lenient')"
            ))),
        }
    }
}

/// Configuration for a single pool
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Ownership and duplicate checks on release
    pub release_check: ReleaseCheck,

    /// Create a fresh element when the registry acquires from an empty pool
    pub grow_on_demand: bool,
}

impl PoolConfig {
    /// Refuse duplicate and foreign releases, never grow implicitly
    pub fn strict() -> Self {
        Self::default()
    }

    /// Accept every release as-is
    pub fn lenient() -> Self {
        Self {
            release_check: ReleaseCheck::Lenient,
            ..Self::default()
        }
    }

    /// Defaults overridden by `RECYCLE_POOL_*` environment variables
    pub fn from_env() -> PoolResult<Self> {
        let mut config = Self::default();

        if let Ok(check) = std::env::var(ENV_RELEASE_CHECK) {
            config.release_check = check.parse()?;
        }

        if let Ok(grow) = std::env::var(ENV_GROW_ON_DEMAND) {
            config.grow_on_demand = parse_flag(&grow)?;
        }

        Ok(config)
    }

    /// Set release check
    pub fn with_release_check(mut self, release_check: ReleaseCheck) -> Self {
        self.release_check = release_check;
        self
    }

    /// Enable or disable growth on empty acquire
    pub fn with_grow_on_demand(mut self, grow_on_demand: bool) -> Self {
        self.grow_on_demand = grow_on_demand;
        self
    }
}

fn parse_flag(value: &str) -> PoolResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(PoolError::invalid_config(format!(
            "expected a boolean flag, got '{other}'"
        ))),
    }
}
