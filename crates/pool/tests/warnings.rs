//! Registry misses and refused duplicates are reported as warnings.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use recycle_pool::testing::{MockScene, Tally};
use recycle_pool::{
    Component, EntityId, Holder, ObjectPoolManager, ObjectPooler, Position, Prefab, Registration,
};
use tracing::Level;

/// Writer that keeps everything the subscriber prints
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with warnings and above captured, and return what was logged
fn warnings_during(f: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.text()
}

struct Battery;

struct Hangar;

fn register_battery(registry: &mut ObjectPoolManager, prefab: &str) -> Registration {
    let pool = ObjectPooler::<Tally>::new(
        Prefab::new(prefab),
        Holder::new("Shells", Position::ORIGIN),
        1,
        MockScene::shared(),
    )
    .unwrap();
    registry.register(Battery, pool, false)
}

#[test]
fn kept_duplicate_registration_warns() {
    let mut registry = ObjectPoolManager::new();
    register_battery(&mut registry, "Shell");

    let output = warnings_during(|| {
        assert_eq!(register_battery(&mut registry, "Flak"), Registration::Kept);
    });

    assert!(output.contains("WARN"), "{output}");
    assert!(output.contains("Battery already has a Tally pool"), "{output}");
}

#[test]
fn first_registration_is_quiet() {
    let mut registry = ObjectPoolManager::new();
    let output = warnings_during(|| {
        register_battery(&mut registry, "Shell");
    });
    assert_eq!(output, "");
}

#[test]
fn release_miss_warns() {
    let mut registry = ObjectPoolManager::new();
    register_battery(&mut registry, "Shell");
    let stray = Tally::from_entity(EntityId::from_raw(3));

    let output = warnings_during(|| {
        assert!(registry.return_to_pool::<Hangar, Tally>(stray).is_err());
    });

    assert!(output.contains("WARN"), "{output}");
    assert!(output.contains("Hangar has no pools registered"), "{output}");
    assert!(output.contains("element=Tally"), "{output}");
}

#[test]
fn acquire_miss_warns() {
    struct Missile;

    impl Component for Missile {
        fn from_entity(_entity: EntityId) -> Self {
            Self
        }

        fn entity(&self) -> EntityId {
            EntityId::from_raw(0)
        }
    }

    let mut registry = ObjectPoolManager::new();
    register_battery(&mut registry, "Shell");

    let output = warnings_during(|| {
        assert!(registry.acquire_from::<Battery, Missile>().is_none());
    });

    assert!(output.contains("WARN"), "{output}");
    assert!(output.contains("Battery has no Missile pool registered"), "{output}");
    assert!(output.contains("owner=Battery"), "{output}");
}

#[test]
fn global_helpers_warn_on_misses() {
    recycle_pool::init();
    let output = warnings_during(|| {
        assert!(recycle_pool::global::acquire_from::<Hangar, Tally>().is_none());
    });
    assert!(output.contains("Hangar has no pools registered"), "{output}");
}
