//! Standalone error types for recycle-pool
//!
//! Uses thiserror for clean, idiomatic Rust error definitions.

use core::fmt;
use thiserror::Error;

use crate::scene::EntityId;

// ============================================================================
// Main Error Types
// ============================================================================

/// Pool and registry errors
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    // --- Construction Errors ---
    #[error("pool construction requires a prefab to instantiate from")]
    MissingPrefab,

    #[error("pool construction requires a holder to place instances under")]
    MissingHolder,

    #[error("initial count cannot be negative: {count}")]
    NegativeInitialCount { count: i64 },

    // --- Registry Errors ---
    #[error("{owner} has no {element} pool registered")]
    NotRegistered {
        owner: &'static str,
        element: &'static str,
    },

    // --- Release Errors ---
    #[error("entity {entity} is already waiting in the pool")]
    DuplicateRelease { entity: EntityId },

    #[error("entity {entity} was not created by this pool")]
    ForeignElement { entity: EntityId },

    // --- Configuration Errors ---
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("pool manifest error: {reason}")]
    Manifest { reason: String },

    #[error("pool '{name}' is not declared in the manifest")]
    UndeclaredPool { name: String },
}

impl PoolError {
    /// Get error code for categorization
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingPrefab => "POOL:BUILD:PREFAB",
            Self::MissingHolder => "POOL:BUILD:HOLDER",
            Self::NegativeInitialCount { .. } => "POOL:BUILD:COUNT",
            Self::NotRegistered { .. } => "POOL:REGISTRY:MISSING",
            Self::DuplicateRelease { .. } => "POOL:RELEASE:DUPLICATE",
            Self::ForeignElement { .. } => "POOL:RELEASE:FOREIGN",
            Self::InvalidConfig { .. } => "POOL:CONFIG:INVALID",
            Self::Manifest { .. } => "POOL:MANIFEST:INVALID",
            Self::UndeclaredPool { .. } => "POOL:MANIFEST:UNDECLARED",
        }
    }

    /// Construction errors are fatal; everything else degrades to a warning.
    #[must_use]
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Self::MissingPrefab | Self::MissingHolder | Self::NegativeInitialCount { .. }
        )
    }

    // ============================================================================
    // Convenience Constructors
    // ============================================================================

    /// Create negative initial count error
    pub fn negative_initial_count(count: i64) -> Self {
        Self::NegativeInitialCount { count }
    }

    /// Create lookup miss error for an (owner, element) pair
    pub fn not_registered(owner: &'static str, element: &'static str) -> Self {
        Self::NotRegistered { owner, element }
    }

    /// Create invalid config error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create manifest error
    pub fn manifest(reason: impl fmt::Display) -> Self {
        Self::Manifest {
            reason: reason.to_string(),
        }
    }

    /// Create undeclared pool error
    pub fn undeclared_pool(name: &str) -> Self {
        Self::UndeclaredPool {
            name: name.to_string(),
        }
    }
}

// ============================================================================
// Rejected releases
// ============================================================================

/// An element the pool refused to take back, returned to the caller intact.
pub struct Rejected<T> {
    element: T,
    reason: PoolError,
}

impl<T> Rejected<T> {
    pub(crate) fn new(element: T, reason: PoolError) -> Self {
        Self { element, reason }
    }

    /// Why the element was refused
    pub fn reason(&self) -> &PoolError {
        &self.reason
    }

    /// Borrow the refused element
    pub fn element(&self) -> &T {
        &self.element
    }

    /// Take the element back
    pub fn into_inner(self) -> T {
        self.element
    }

    /// Split into element and reason
    pub fn into_parts(self) -> (T, PoolError) {
        (self.element, self.reason)
    }
}

impl<T> fmt::Debug for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element rejected: {}", self.reason)
    }
}

impl<T> std::error::Error for Rejected<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result type for pool operations
pub type PoolResult<T> = core::result::Result<T, PoolError>;

/// Result of handing an element back to a pool
pub type ReleaseResult<T> = core::result::Result<(), Rejected<T>>;

// ============================================================================
// Tests
// ============================================================================
