//! Registry behavior across owners, element types and overrides.

use std::rc::Rc;

use pretty_assertions::assert_eq;
use recycle_pool::testing::{Inert, MockScene, Tally};
use recycle_pool::{
    Component, EntityId, Holder, ObjectPoolManager, ObjectPooler, PoolError, Position, Prefab,
    Registration, SharedScene,
};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
struct Turret {
    name: &'static str,
}

struct Ship;

fn pool<T: Component>(scene: &SharedScene, prefab: &str, count: i64) -> ObjectPooler<T> {
    ObjectPooler::new(
        Prefab::new(prefab),
        Holder::new(format!("{prefab}Holder"), Position::ORIGIN),
        count,
        scene.clone(),
    )
    .unwrap()
}

fn scene() -> SharedScene {
    MockScene::shared()
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

#[test]
fn acquire_reflects_registered_pool() {
    let scene = scene();
    let mut registry = ObjectPoolManager::new();
    registry.register(Turret { name: "north" }, pool::<Tally>(&scene, "Bullet", 2), false);

    let bullet = registry.acquire_from::<Turret, Tally>().unwrap();
    assert_eq!(bullet.entity(), EntityId::from_raw(1));
    assert_eq!(registry.stats::<Turret, Tally>().pooled, 1);
}

#[test]
fn unregistered_pairs_come_back_empty() {
    let scene = scene();
    let mut registry = ObjectPoolManager::new();
    registry.register(Turret { name: "north" }, pool::<Tally>(&scene, "Bullet", 2), false);

    assert!(registry.acquire_from::<Turret, Inert>().is_none());
    assert!(registry.acquire_from::<Ship, Tally>().is_none());
    assert!(registry.acquire_from_with::<Ship, Tally>(true).is_none());
}

#[test]
fn owner_types_are_independent() {
    let scene = scene();
    let mut registry = ObjectPoolManager::new();
    registry.register(Turret { name: "north" }, pool::<Tally>(&scene, "Bullet", 1), false);
    registry.register(Ship, pool::<Tally>(&scene, "Torpedo", 1), false);

    let bullet = registry.pool::<Turret, Tally>().unwrap();
    let torpedo = registry.pool::<Ship, Tally>().unwrap();
    assert!(!Rc::ptr_eq(&bullet, &torpedo));
    assert_eq!(torpedo.prefab().name(), "Torpedo");
    assert_eq!(registry.owner_count(), 2);
}

#[test]
fn owner_is_reachable_through_registry() {
    let scene = scene();
    let mut registry = ObjectPoolManager::new();
    registry.register(Turret { name: "north" }, pool::<Tally>(&scene, "Bullet", 0), false);
    registry.register(Turret { name: "south" }, pool::<Inert>(&scene, "Spark", 0), false);

    let owner = registry.get_owner::<Turret>().unwrap();
    assert_eq!(*owner, Turret { name: "north" });
    assert!(registry.get_owner::<Ship>().is_none());
}

#[test]
fn shared_owner_and_pool_stay_shared() {
    let scene = scene();
    let mut registry = ObjectPoolManager::new();
    let owner = Rc::new(Turret { name: "north" });
    let bullets = Rc::new(pool::<Tally>(&scene, "Bullet", 1));

    let outcome = registry.register_shared(owner.clone(), bullets.clone(), false);
    assert_eq!(outcome, Registration::Created);
    assert!(Rc::ptr_eq(&owner, &registry.get_owner::<Turret>().unwrap()));

    registry.acquire_from::<Turret, Tally>().unwrap();
    assert_eq!(bullets.pooled(), 0);
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

#[test]
fn duplicate_without_override_keeps_original() {
    let scene = scene();
    let mut registry = ObjectPoolManager::new();
    registry.register(Turret { name: "north" }, pool::<Tally>(&scene, "Bullet", 1), false);

    let outcome = registry.register(
        Turret { name: "north" },
        pool::<Tally>(&scene, "Laser", 4),
        false,
    );
    assert_eq!(outcome, Registration::Kept);

    let first = registry.acquire_from::<Turret, Tally>().unwrap();
    assert_eq!(first.entity(), EntityId::from_raw(1));
    assert!(registry.acquire_from::<Turret, Tally>().is_none());
}

#[test]
fn duplicate_with_override_replaces() {
    let scene = scene();
    let mut registry = ObjectPoolManager::new();
    registry.register(Turret { name: "north" }, pool::<Tally>(&scene, "Bullet", 1), false);

    let outcome = registry.register(
        Turret { name: "north" },
        pool::<Tally>(&scene, "Laser", 4),
        true,
    );
    assert_eq!(outcome, Registration::Replaced);

    // Laser entities were instantiated after the single bullet
    let first = registry.acquire_from::<Turret, Tally>().unwrap();
    assert_eq!(first.entity(), EntityId::from_raw(2));
    assert_eq!(registry.stats::<Turret, Tally>().pooled, 3);
}

// ---------------------------------------------------------------------------
// Removal
// ---------------------------------------------------------------------------

#[test]
fn unregister_last_element_type_drops_owner() {
    let scene = scene();
    let mut registry = ObjectPoolManager::new();
    registry.register(Turret { name: "north" }, pool::<Tally>(&scene, "Bullet", 1), false);

    assert!(registry.unregister::<Turret, Tally>());
    assert!(registry.get_owner::<Turret>().is_none());
    assert!(registry.acquire_from::<Turret, Tally>().is_none());
}

#[test]
fn registering_after_removal_records_new_owner() {
    let scene = scene();
    let mut registry = ObjectPoolManager::new();
    registry.register(Turret { name: "north" }, pool::<Tally>(&scene, "Bullet", 1), false);
    registry.unregister::<Turret, Tally>();

    let outcome = registry.register(
        Turret { name: "east" },
        pool::<Tally>(&scene, "Bullet", 1),
        false,
    );
    assert_eq!(outcome, Registration::Created);
    assert_eq!(registry.get_owner::<Turret>().unwrap().name, "east");
}

#[test]
fn clear_drops_everything() {
    let scene = scene();
    let mut registry = ObjectPoolManager::new();
    registry.register(Turret { name: "north" }, pool::<Tally>(&scene, "Bullet", 1), false);
    registry.register(Ship, pool::<Inert>(&scene, "Spark", 1), false);

    registry.clear();
    assert_eq!(registry.owner_count(), 0);
    assert_eq!(registry.pool_count(), 0);
}

// ---------------------------------------------------------------------------
// Returns
// ---------------------------------------------------------------------------

#[test]
fn return_to_unregistered_pair_hands_element_back() {
    let registry = ObjectPoolManager::new();
    let stray = Tally::from_entity(EntityId::from_raw(12));

    let rejected = registry.return_to_pool::<Turret, Tally>(stray.clone()).unwrap_err();
    assert_eq!(
        rejected.reason(),
        &PoolError::NotRegistered {
            owner: "Turret",
            element: "Tally"
        }
    );
    assert_eq!(rejected.into_inner(), stray);
}

#[test]
fn strict_pools_refuse_elements_of_other_pools() {
    let scene = scene();
    let mut registry = ObjectPoolManager::new();
    registry.register(Turret { name: "north" }, pool::<Tally>(&scene, "Bullet", 1), false);
    registry.register(Ship, pool::<Tally>(&scene, "Torpedo", 1), false);

    let torpedo = registry.acquire_from::<Ship, Tally>().unwrap();
    let rejected = registry.return_to_pool::<Turret, Tally>(torpedo).unwrap_err();
    assert_eq!(rejected.reason().code(), "POOL:RELEASE:FOREIGN");

    registry
        .return_to_pool::<Ship, Tally>(rejected.into_inner())
        .unwrap();
    assert_eq!(registry.stats::<Ship, Tally>().pooled, 1);
    assert_eq!(registry.stats::<Turret, Tally>().rejections, 1);
}
