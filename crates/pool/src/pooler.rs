//! Core object pool implementation
//!
//! `ObjectPooler` keeps a FIFO queue of inactive scene entities created from
//! one prefab. It is single-threaded: the queue lives in a `RefCell` so a
//! shared [`PoolHandle`] can acquire and release through `&self`.
//!
//! Stocking (construction and [`ObjectPooler::reserve`]) instantiates each
//! element at the holder's position, parents it under the holder, runs the
//! init hook while the entity is still active, then deactivates it. Elements created on demand by
//! [`ObjectPooler::acquire`] are only instantiated: they go straight to the
//! caller and are not counted as pooled until released.

use core::cell::RefCell;
use core::fmt;
use core::marker::PhantomData;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::config::{PoolConfig, ReleaseCheck};
use crate::error::{PoolError, PoolResult, Rejected, ReleaseResult};
use crate::poolable::{Component, init_element, reset_element};
use crate::scene::{EntityId, Holder, Prefab, SharedScene};
use crate::stats::{Counters, PoolStats};

/// Shared handle to a pool, as stored in the registry
pub type PoolHandle<T> = Rc<ObjectPooler<T>>;

/// Prefab, holder and scene: everything needed to make a new element
struct Factory {
    prefab: Prefab,
    holder: Holder,
    scene: SharedScene,
}

/// Queue-based pool of reusable scene entities
///
/// # Example
/// ```
/// use recycle_pool::testing::{MockScene, Tally};
/// use recycle_pool::{Holder, ObjectPooler, Position, Prefab};
///
/// let scene = MockScene::shared();
/// let pool = ObjectPooler::<Tally>::new(
///     Prefab::new("Bullet"),
///     Holder::new("Bullets", Position::ORIGIN),
///     3,
///     scene.clone(),
/// )?;
///
/// let bullet = pool.acquire(false).unwrap();
/// assert_eq!(pool.pooled(), 2);
///
/// pool.release(bullet).unwrap();
/// assert_eq!(pool.pooled(), 3);
/// # Ok::<(), recycle_pool::PoolError>(())
/// ```
pub struct ObjectPooler<T: Component> {
    queue: RefCell<VecDeque<T>>,
    queued: RefCell<HashSet<EntityId>>,
    issued: RefCell<HashSet<EntityId>>,
    factory: Factory,
    config: PoolConfig,
    counters: Counters,
}

impl<T: Component> ObjectPooler<T> {
    /// Start building a pool on `scene`
    pub fn builder(scene: SharedScene) -> PoolBuilder<T> {
        PoolBuilder::new(scene)
    }

    /// Create a pool stocked with `initial_count` inactive elements
    pub fn new(
        prefab: Prefab,
        holder: Holder,
        initial_count: i64,
        scene: SharedScene,
    ) -> PoolResult<Self> {
        Self::builder(scene)
            .prefab(prefab)
            .holder(holder)
            .initial_count(initial_count)
            .build()
    }

    fn stocked(factory: Factory, count: usize, config: PoolConfig) -> Self {
        let pool = Self {
            queue: RefCell::new(VecDeque::with_capacity(count)),
            queued: RefCell::new(HashSet::with_capacity(count)),
            issued: RefCell::new(HashSet::with_capacity(count)),
            factory,
            config,
            counters: Counters::default(),
        };
        pool.reserve(count);

        debug!(
            prefab = %pool.factory.prefab,
            holder = pool.factory.holder.name(),
            count,
            release_check = %pool.config.release_check,
            "stocked pool"
        );

        pool
    }

    /// Take the oldest queued element
    ///
    /// When the queue is empty, returns `None` unless `allow_create` is set,
    /// in which case one new element is instantiated and handed out without
    /// being stocked.
    pub fn acquire(&self, allow_create: bool) -> Option<T> {
        self.counters.record_get();

        let next = self.queue.borrow_mut().pop_front();
        if let Some(element) = next {
            self.queued.borrow_mut().remove(&element.entity());
            self.counters.record_hit();
            trace!(prefab = %self.factory.prefab, entity = %element.entity(), "acquired");
            return Some(element);
        }

        self.counters.record_miss();
        if !allow_create {
            trace!(prefab = %self.factory.prefab, "pool empty");
            return None;
        }

        let element = self.instantiate();
        self.counters.record_handout();
        debug!(
            prefab = %self.factory.prefab,
            entity = %element.entity(),
            "pool empty, created element on demand"
        );
        Some(element)
    }

    /// Run the reset hook and queue the element for reuse
    ///
    /// With [`ReleaseCheck::Strict`] an element that is already queued, or
    /// that this pool never created, is handed back inside [`Rejected`].
    /// Elements are told apart by [`EntityId`], which is only unique within
    /// one scene.
    pub fn release(&self, mut element: T) -> ReleaseResult<T> {
        let entity = element.entity();

        if self.config.release_check == ReleaseCheck::Strict {
            if let Some(reason) = self.release_violation(entity) {
                self.counters.record_rejection();
                warn!(
                    prefab = %self.factory.prefab,
                    entity = %entity,
                    code = reason.code(),
                    "release refused: {reason}"
                );
                return Err(Rejected::new(element, reason));
            }
        }

        reset_element(&mut element);
        self.queued.borrow_mut().insert(entity);
        self.queue.borrow_mut().push_back(element);
        self.counters.record_return();

        trace!(prefab = %self.factory.prefab, entity = %entity, pooled = self.pooled(), "released");
        Ok(())
    }

    fn release_violation(&self, entity: EntityId) -> Option<PoolError> {
        if self.queued.borrow().contains(&entity) {
            Some(PoolError::DuplicateRelease { entity })
        } else if !self.issued.borrow().contains(&entity) {
            Some(PoolError::ForeignElement { entity })
        } else {
            None
        }
    }

    /// Stock `additional` more elements
    pub fn reserve(&self, additional: usize) {
        self.queue.borrow_mut().reserve(additional);

        for _ in 0..additional {
            let mut element = self.instantiate();
            let entity = element.entity();
            self.factory
                .scene
                .borrow_mut()
                .attach(entity, &self.factory.holder);
            init_element(&mut element);
            self.factory.scene.borrow_mut().set_active(entity, false);

            self.queued.borrow_mut().insert(entity);
            self.queue.borrow_mut().push_back(element);
        }
    }

    fn instantiate(&self) -> T {
        let entity = self
            .factory
            .scene
            .borrow_mut()
            .instantiate(&self.factory.prefab, self.factory.holder.position());
        self.issued.borrow_mut().insert(entity);
        self.counters.record_creation();
        T::from_entity(entity)
    }

    /// Number of elements waiting in the queue
    #[must_use]
    pub fn pooled(&self) -> usize {
        self.queue.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Whether `entity` was instantiated by this pool's scene for this pool
    #[must_use]
    pub fn owns(&self, entity: EntityId) -> bool {
        self.issued.borrow().contains(&entity)
    }

    pub fn prefab(&self) -> &Prefab {
        &self.factory.prefab
    }

    pub fn holder(&self) -> &Holder {
        &self.factory.holder
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Snapshot of the pool counters
    pub fn stats(&self) -> PoolStats {
        self.counters.snapshot(self.pooled())
    }
}

impl<T: Component> fmt::Debug for ObjectPooler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectPooler")
            .field("element", &core::any::type_name::<T>())
            .field("prefab", &self.factory.prefab)
            .field("holder", &self.factory.holder)
            .field("pooled", &self.pooled())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ObjectPooler`]
///
/// Prefab and holder are mandatory; `build` reports which one is missing.
pub struct PoolBuilder<T> {
    scene: SharedScene,
    pub(crate) prefab: Option<Prefab>,
    pub(crate) holder: Option<Holder>,
    pub(crate) initial_count: i64,
    pub(crate) config: PoolConfig,
    _element: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for PoolBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolBuilder")
            .field("element", &core::any::type_name::<T>())
            .field("prefab", &self.prefab)
            .field("holder", &self.holder)
            .field("initial_count", &self.initial_count)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T: Component> PoolBuilder<T> {
    pub fn new(scene: SharedScene) -> Self {
        Self {
            scene,
            prefab: None,
            holder: None,
            initial_count: 0,
            config: PoolConfig::default(),
            _element: PhantomData,
        }
    }

    /// Set the prefab elements are instantiated from
    pub fn prefab(mut self, prefab: Prefab) -> Self {
        self.prefab = Some(prefab);
        self
    }

    /// Set the holder elements are placed under
    pub fn holder(mut self, holder: Holder) -> Self {
        self.holder = Some(holder);
        self
    }

    /// Number of elements stocked up front
    pub fn initial_count(mut self, initial_count: i64) -> Self {
        self.initial_count = initial_count;
        self
    }

    /// Set pool configuration
    pub fn config(mut self, config: PoolConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate and stock the pool
    pub fn build(self) -> PoolResult<ObjectPooler<T>> {
        let prefab = self.prefab.ok_or(PoolError::MissingPrefab)?;
        let holder = self.holder.ok_or(PoolError::MissingHolder)?;
        if self.initial_count < 0 {
            return Err(PoolError::negative_initial_count(self.initial_count));
        }
        let count = usize::try_from(self.initial_count).map_err(|_| {
            PoolError::invalid_config(format!(
                "initial count {} does not fit this platform",
                self.initial_count
            ))
        })?;

        let factory = Factory {
            prefab,
            holder,
            scene: self.scene,
        };
        Ok(ObjectPooler::stocked(factory, count, self.config))
    }
}
