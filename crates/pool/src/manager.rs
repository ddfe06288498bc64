//! Pool registry: owner-keyed directory of typed pools.
//!
//! Pools are filed under two type keys: the owner type (the component that
//! "has" the pools) and the element type. Each owner type also maps to a
//! single owner instance, so callers can reach the owner through the
//! registry instead of through a singleton.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::{PoolError, PoolResult, Rejected, ReleaseResult};
use crate::key::TypeKey;
use crate::poolable::Component;
use crate::pooler::{ObjectPooler, PoolHandle};
use crate::scene::{Holder, Prefab, SharedScene};
use crate::stats::PoolStats;

#[cfg(feature = "manifest")]
use crate::manifest::PoolManifest;

/// What `register` did with the pool it was given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// First pool for this owner; the owner instance was recorded
    Created,
    /// New element pool under an owner that already had pools
    Added,
    /// Existing pool overwritten
    Replaced,
    /// Existing pool kept, the new one was dropped
    Kept,
}

impl Registration {
    /// Whether the offered pool ended up in the registry
    pub fn is_stored(self) -> bool {
        !matches!(self, Self::Kept)
    }
}

/// Element pools of one owner type, keyed by element type.
/// Values are `PoolHandle<T>` for the element type `T` of the key.
type PoolMap = HashMap<TypeKey, Box<dyn Any>>;

/// Registry of pools keyed by (owner type, element type)
#[derive(Default)]
pub struct ObjectPoolManager {
    pools: HashMap<TypeKey, PoolMap>,
    owners: HashMap<TypeKey, Rc<dyn Any>>,
}

impl ObjectPoolManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Register
    // ---------------------------------------------------------------------

    /// File `pool` under (`O`, `T`), recording `owner` if `O` is new
    pub fn register<O: Any, T: Component>(
        &mut self,
        owner: O,
        pool: ObjectPooler<T>,
        overwrite: bool,
    ) -> Registration {
        self.register_shared(Rc::new(owner), Rc::new(pool), overwrite)
    }

    /// Same as [`register`](Self::register) for already shared owner and pool
    pub fn register_shared<O: Any, T: Component>(
        &mut self,
        owner: Rc<O>,
        pool: PoolHandle<T>,
        overwrite: bool,
    ) -> Registration {
        self.insert(TypeKey::of::<O>(), TypeKey::of::<T>(), owner, pool, overwrite)
    }

    /// Build a pool for `T` and file it under (`T`, `T`)
    ///
    /// The pool doubles as its own owner instance. It is returned even when
    /// an existing pool was kept, in which case it is not the registered one.
    pub fn register_simple<T: Component>(
        &mut self,
        scene: SharedScene,
        prefab: Prefab,
        holder: Holder,
        initial_count: i64,
        overwrite: bool,
    ) -> PoolResult<PoolHandle<T>> {
        let pool = ObjectPooler::new(prefab, holder, initial_count, scene)?;
        Ok(self.register_built(pool, overwrite))
    }

    /// File an already built pool under (`T`, `T`)
    pub fn register_built<T: Component>(
        &mut self,
        pool: ObjectPooler<T>,
        overwrite: bool,
    ) -> PoolHandle<T> {
        let handle = Rc::new(pool);
        let key = TypeKey::of::<T>();
        self.insert(key, key, handle.clone(), handle.clone(), overwrite);
        handle
    }

    /// Build the pool declared as `name` in `manifest` and file it under (`T`, `T`)
    #[cfg(feature = "manifest")]
    #[cfg_attr(docsrs, doc(cfg(feature = "manifest")))]
    pub fn register_declared<T: Component>(
        &mut self,
        manifest: &PoolManifest,
        name: &str,
        scene: SharedScene,
    ) -> PoolResult<PoolHandle<T>> {
        let overwrite = manifest
            .get(name)
            .ok_or_else(|| PoolError::undeclared_pool(name))?
            .overwrite;
        let pool = manifest.builder::<T>(name, scene)?.build()?;
        Ok(self.register_built(pool, overwrite))
    }

    fn insert<T: Component>(
        &mut self,
        owner_key: TypeKey,
        element_key: TypeKey,
        owner: Rc<dyn Any>,
        pool: PoolHandle<T>,
        overwrite: bool,
    ) -> Registration {
        let Some(pools) = self.pools.get_mut(&owner_key) else {
            self.owners.insert(owner_key, owner);
            let pools: PoolMap = HashMap::from([(element_key, Box::new(pool) as Box<dyn Any>)]);
            self.pools.insert(owner_key, pools);
            debug!(owner = %owner_key, element = %element_key, "registered owner and pool");
            return Registration::Created;
        };

        if !pools.contains_key(&element_key) {
            pools.insert(element_key, Box::new(pool));
            debug!(owner = %owner_key, element = %element_key, "registered pool");
            return Registration::Added;
        }

        if overwrite {
            pools.insert(element_key, Box::new(pool));
            debug!(owner = %owner_key, element = %element_key, "replaced pool");
            Registration::Replaced
        } else {
            warn!(
                owner = %owner_key,
                element = %element_key,
                "{owner_key} already has a {element_key} pool, keeping the existing one"
            );
            Registration::Kept
        }
    }

    // ---------------------------------------------------------------------
    // Unregister
    // ---------------------------------------------------------------------

    /// Drop the (`O`, `T`) pool, and the owner with it when it was `O`'s last
    ///
    /// Returns whether the pool was registered, combined with the owner
    /// removal when that happened.
    pub fn unregister<O: Any, T: Component>(&mut self) -> bool {
        let owner_key = TypeKey::of::<O>();
        let Some(pools) = self.pools.get_mut(&owner_key) else {
            return false;
        };

        let removed = pools.remove(&TypeKey::of::<T>()).is_some();
        if pools.is_empty() {
            self.pools.remove(&owner_key);
            let owner_removed = self.owners.remove(&owner_key).is_some();
            debug!(owner = %owner_key, "last pool unregistered, owner removed");
            return owner_removed && removed;
        }
        removed
    }

    /// Drop every pool of `O` and its owner instance; true if both existed
    pub fn remove_owner<O: Any>(&mut self) -> bool {
        let owner_key = TypeKey::of::<O>();
        let pools_removed = self.pools.remove(&owner_key).is_some();
        let owner_removed = self.owners.remove(&owner_key).is_some();
        pools_removed && owner_removed
    }

    /// Drop every pool of `O` and its owner instance, if any
    pub fn clear_pools<O: Any>(&mut self) {
        let owner_key = TypeKey::of::<O>();
        if let Some(pools) = self.pools.remove(&owner_key) {
            self.owners.remove(&owner_key);
            debug!(owner = %owner_key, pools = pools.len(), "cleared pools");
        }
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.pools.clear();
        self.owners.clear();
    }

    // ---------------------------------------------------------------------
    // Acquire / return
    // ---------------------------------------------------------------------

    /// Acquire from the (`O`, `T`) pool, growing it if its config says so
    pub fn acquire_from<O: Any, T: Component>(&self) -> Option<T> {
        let pool = self.lookup::<O, T>()?;
        pool.acquire(pool.config().grow_on_demand)
    }

    /// Acquire from the (`O`, `T`) pool with an explicit growth choice
    pub fn acquire_from_with<O: Any, T: Component>(&self, allow_create: bool) -> Option<T> {
        self.lookup::<O, T>()?.acquire(allow_create)
    }

    /// Hand `element` back to the (`O`, `T`) pool
    ///
    /// When no such pool is registered the element comes back unchanged.
    pub fn return_to_pool<O: Any, T: Component>(&self, element: T) -> ReleaseResult<T> {
        match self.lookup::<O, T>() {
            Some(pool) => pool.release(element),
            None => Err(unregistered::<O, T>(element)),
        }
    }

    /// Registered pool for (`O`, `T`), warning on a miss
    pub(crate) fn lookup<O: Any, T: Component>(&self) -> Option<PoolHandle<T>> {
        let owner_key = TypeKey::of::<O>();
        let element_key = TypeKey::of::<T>();

        let Some(pools) = self.pools.get(&owner_key) else {
            warn!(
                owner = %owner_key,
                element = %element_key,
                "{owner_key} has no pools registered"
            );
            return None;
        };
        let pool = pools
            .get(&element_key)
            .and_then(|pool| pool.downcast_ref::<PoolHandle<T>>())
            .cloned();
        if pool.is_none() {
            warn!(
                owner = %owner_key,
                element = %element_key,
                "{owner_key} has no {element_key} pool registered"
            );
        }
        pool
    }

    // ---------------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------------

    /// Owner instance recorded for `O`
    ///
    /// Owners recorded by [`register_simple`](Self::register_simple) are the
    /// pools themselves, so this returns `None` for them.
    pub fn get_owner<O: Any>(&self) -> Option<Rc<O>> {
        self.owners
            .get(&TypeKey::of::<O>())
            .cloned()
            .and_then(|owner| owner.downcast::<O>().ok())
    }

    /// Registered pool for (`O`, `T`), without logging on a miss
    pub fn pool<O: Any, T: Component>(&self) -> Option<PoolHandle<T>> {
        self.pools
            .get(&TypeKey::of::<O>())?
            .get(&TypeKey::of::<T>())?
            .downcast_ref::<PoolHandle<T>>()
            .cloned()
    }

    pub fn contains<O: Any, T: Component>(&self) -> bool {
        self.pools
            .get(&TypeKey::of::<O>())
            .is_some_and(|pools| pools.contains_key(&TypeKey::of::<T>()))
    }

    /// Whether an owner instance is recorded for `O`, whatever its type
    pub fn contains_owner<O: Any>(&self) -> bool {
        self.owners.contains_key(&TypeKey::of::<O>())
    }

    /// Number of owner types with pools
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    /// Number of pools across all owners
    pub fn pool_count(&self) -> usize {
        self.pools.values().map(HashMap::len).sum()
    }

    // ---------------------------------------------------------------------
    // Debug
    // ---------------------------------------------------------------------

    /// Counters of the (`O`, `T`) pool, zeroed when it is not registered
    pub fn stats<O: Any, T: Component>(&self) -> PoolStats {
        self.pool::<O, T>()
            .map(|pool| pool.stats())
            .unwrap_or_default()
    }
}

/// `element` handed back because (`O`, `T`) has no pool
pub(crate) fn unregistered<O: Any, T: Component>(element: T) -> Rejected<T> {
    Rejected::new(
        element,
        PoolError::not_registered(
            TypeKey::of::<O>().short_name(),
            TypeKey::of::<T>().short_name(),
        ),
    )
}

impl std::fmt::Debug for ObjectPoolManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (owner, pools) in &self.pools {
            let elements: Vec<_> = pools.keys().map(TypeKey::short_name).collect();
            map.entry(&owner.short_name(), &elements);
        }
        map.finish()
    }
}
