//! # recycle-pool
//!
//! Reusable entity pools for real-time scenes.
//!
//! Spawning and despawning scene entities every frame is expensive. This crate
//! stocks inactive entities up front and recycles them:
//! - [`ObjectPooler`]: FIFO pool of entities created from one prefab
//! - [`ObjectPoolManager`]: registry of pools keyed by owner type and element type
//! - [`Poolable`]: optional init/reset hooks run by the pool
//! - [`global`]: thread-local registry for code that cannot carry a manager
//!
//! ## Quick Start
//!
//! ```rust
//! use recycle_pool::prelude::*;
//! use recycle_pool::testing::{MockScene, Tally};
//!
//! struct Turret;
//!
//! let scene = MockScene::shared();
//! let mut pools = ObjectPoolManager::new();
//!
//! let bullets = ObjectPooler::<Tally>::new(
//!     Prefab::new("Bullet"),
//!     Holder::new("Bullets", Position::ORIGIN),
//!     8,
//!     scene.clone(),
//! )?;
//! pools.register(Turret, bullets, false);
//!
//! let bullet = pools.acquire_from::<Turret, Tally>().unwrap();
//! // ... fly, hit something ...
//! pools.return_to_pool::<Turret, Tally>(bullet).unwrap();
//! assert_eq!(pools.stats::<Turret, Tally>().pooled, 8);
//! # Ok::<(), PoolError>(())
//! ```
//!
//! ## Features
//!
//! - `manifest` (default): JSON pool manifests via [`PoolManifest`]
//! - `testing`: recording scene double and test components

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
// Precision loss in u64 -> f64 casts is acceptable for stats
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]

// Error types
pub mod error;

// Core modules
pub mod config;
pub mod global;
pub mod key;
pub mod manager;
#[cfg(feature = "manifest")]
#[cfg_attr(docsrs, doc(cfg(feature = "manifest")))]
pub mod manifest;
pub mod poolable;
pub mod pooler;
pub mod scene;
pub mod stats;

#[cfg(any(test, feature = "testing"))]
#[cfg_attr(docsrs, doc(cfg(feature = "testing")))]
pub mod testing;

pub use crate::config::{PoolConfig, ReleaseCheck};
pub use crate::error::{PoolError, PoolResult, Rejected, ReleaseResult};
pub use crate::key::TypeKey;
pub use crate::manager::{ObjectPoolManager, Registration};
#[cfg(feature = "manifest")]
pub use crate::manifest::{PoolDecl, PoolManifest};
pub use crate::poolable::{Component, Poolable};
pub use crate::pooler::{ObjectPooler, PoolBuilder, PoolHandle};
pub use crate::scene::{EntityId, Holder, Position, Prefab, Scene, SharedScene};
pub use crate::stats::PoolStats;

pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::config::{PoolConfig, ReleaseCheck};
    pub use crate::error::{PoolError, PoolResult, Rejected};
    pub use crate::manager::ObjectPoolManager;
    #[cfg(feature = "manifest")]
    pub use crate::manifest::PoolManifest;
    pub use crate::poolable::{Component, Poolable};
    pub use crate::pooler::{ObjectPooler, PoolHandle};
    pub use crate::scene::{EntityId, Holder, Position, Prefab, Scene, SharedScene};
}

use tracing::{debug, info};

/// Prepare this thread's [`global`] registry.
///
/// Anything registered by an earlier session on the same thread is dropped.
///
/// # Examples
///
/// ```rust
/// recycle_pool::init();
/// // register pools, run the scene ...
/// recycle_pool::shutdown();
/// ```
pub fn init() {
    debug!("initializing recycle-pool registry");
    global::reset();
    info!("recycle-pool registry initialized");
}

/// Drop every pool and owner in this thread's [`global`] registry.
pub fn shutdown() {
    let (owners, pools) = global::with(|registry| {
        let counts = (registry.owner_count(), registry.pool_count());
        registry.clear();
        counts
    });
    info!(owners, pools, "recycle-pool registry shut down");
}
