//! Process-wide registry for the current thread
//!
//! Scenes are single-threaded, so the shared registry is thread-local: each
//! thread that drives a scene sees its own [`ObjectPoolManager`]. Use it when
//! threading a manager through every call site is impractical; otherwise own
//! a manager directly.
//!
//! Lifecycle hooks run while their pool is in use, so a hook that reaches the
//! registry must go through [`acquire_from`] and [`return_to_pool`]. Those
//! hold the registry only long enough to look the pool up.

use core::any::Any;
use core::cell::RefCell;

use crate::error::ReleaseResult;
use crate::manager::{self, ObjectPoolManager};
use crate::poolable::Component;

thread_local! {
    static REGISTRY: RefCell<ObjectPoolManager> = RefCell::new(ObjectPoolManager::new());
}

/// Run `f` against this thread's registry
///
/// # Panics
///
/// Panics if called again from inside `f`. Element hooks run inside `f`
/// when `f` acquires or releases, so hooks must not call this.
pub fn with<R>(f: impl FnOnce(&mut ObjectPoolManager) -> R) -> R {
    REGISTRY.with(|registry| f(&mut registry.borrow_mut()))
}

/// Acquire from this thread's (`O`, `T`) pool, growing it if its config says so
///
/// The registry is released before the pool runs, so this is safe to call
/// from element hooks.
pub fn acquire_from<O: Any, T: Component>() -> Option<T> {
    let pool = with(|registry| registry.lookup::<O, T>())?;
    pool.acquire(pool.config().grow_on_demand)
}

/// Acquire from this thread's (`O`, `T`) pool with an explicit growth choice
pub fn acquire_from_with<O: Any, T: Component>(allow_create: bool) -> Option<T> {
    with(|registry| registry.lookup::<O, T>())?.acquire(allow_create)
}

/// Hand `element` back to this thread's (`O`, `T`) pool
///
/// Like [`acquire_from`], the reset hook runs with the registry free.
pub fn return_to_pool<O: Any, T: Component>(element: T) -> ReleaseResult<T> {
    match with(|registry| registry.lookup::<O, T>()) {
        Some(pool) => pool.release(element),
        None => Err(manager::unregistered::<O, T>(element)),
    }
}

/// Whether the registry is borrowed right now, i.e. the caller is inside [`with`]
pub fn is_busy() -> bool {
    REGISTRY.with(|registry| registry.try_borrow_mut().is_err())
}

/// Drop every pool and owner registered on this thread
pub fn reset() {
    with(ObjectPoolManager::clear);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poolable::Poolable;
    use crate::scene::{EntityId, Holder, Position, Prefab, SharedScene};
    use crate::testing::{MockScene, Tally};
    use pretty_assertions::assert_eq;

    struct Gun;

    struct Launcher;

    /// Effect that carries a child element and hands it back on reset
    struct Flare {
        entity: EntityId,
        child: Option<Tally>,
    }

    impl Component for Flare {
        fn from_entity(entity: EntityId) -> Self {
            Self {
                entity,
                child: None,
            }
        }

        fn entity(&self) -> EntityId {
            self.entity
        }

        fn as_poolable(&mut self) -> Option<&mut dyn Poolable> {
            Some(self)
        }
    }

    impl Poolable for Flare {
        fn reset(&mut self) {
            if let Some(child) = self.child.take() {
                assert!(!is_busy());
                return_to_pool::<Launcher, Tally>(child).unwrap();
            }
        }
    }

    fn register_launcher(scene: &SharedScene) {
        let flares = crate::ObjectPooler::<Flare>::new(
            Prefab::new("Flare"),
            Holder::new("Flares", Position::ORIGIN),
            1,
            scene.clone(),
        )
        .unwrap();
        let sparks = crate::ObjectPooler::<Tally>::new(
            Prefab::new("Spark"),
            Holder::new("Sparks", Position::ORIGIN),
            2,
            scene.clone(),
        )
        .unwrap();
        with(|registry| {
            registry.register(Launcher, flares, false);
            registry.register(Launcher, sparks, false);
        });
    }

    #[test]
    fn test_registry_is_per_thread() {
        reset();
        let pool = crate::ObjectPooler::<Tally>::new(
            Prefab::new("Bullet"),
            Holder::new("Bullets", Position::ORIGIN),
            1,
            MockScene::shared(),
        )
        .unwrap();
        with(|registry| registry.register(Gun, pool, false));
        assert!(with(|registry| registry.contains::<Gun, Tally>()));

        let elsewhere = std::thread::spawn(|| with(|registry| registry.pool_count()))
            .join()
            .unwrap();
        assert_eq!(elsewhere, 0);

        reset();
        assert!(!with(|registry| registry.contains_owner::<Gun>()));
    }

    #[test]
    fn test_reset_hook_can_return_children_through_registry() {
        reset();
        let scene: SharedScene = MockScene::shared();
        register_launcher(&scene);

        let mut flare = acquire_from::<Launcher, Flare>().unwrap();
        flare.child = acquire_from::<Launcher, Tally>();
        assert_eq!(with(|registry| registry.stats::<Launcher, Tally>().pooled), 1);

        assert!(return_to_pool::<Launcher, Flare>(flare).is_ok());
        let (flares, sparks) = with(|registry| {
            (
                registry.stats::<Launcher, Flare>(),
                registry.stats::<Launcher, Tally>(),
            )
        });
        assert_eq!((flares.pooled, flares.active), (1, 0));
        assert_eq!((sparks.pooled, sparks.active), (2, 0));
        assert_eq!(acquire_from::<Launcher, Tally>().unwrap().resets, 0);
        assert_eq!(acquire_from::<Launcher, Tally>().unwrap().resets, 1);
        reset();
    }

    #[test]
    fn test_helpers_on_unregistered_pairs() {
        reset();
        assert!(acquire_from::<Gun, Tally>().is_none());
        assert!(acquire_from_with::<Gun, Tally>(true).is_none());

        let stray = Tally::from_entity(EntityId::from_raw(7));
        let rejected = return_to_pool::<Gun, Tally>(stray.clone()).unwrap_err();
        assert_eq!(rejected.reason().code(), "POOL:REGISTRY:MISSING");
        assert_eq!(rejected.into_inner(), stray);
    }

    #[test]
    fn test_busy_inside_with() {
        assert!(!is_busy());
        assert!(with(|_| is_busy()));
    }
}
