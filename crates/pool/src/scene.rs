//! Host scene contracts consumed by the pools
//!
//! The pool never owns the scene graph. It asks the host to instantiate a
//! prefab at a position, to parent the new entity under a holder and to
//! toggle its active state. Everything else about entities stays on the host
//! side behind [`EntityId`].

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Point in scene space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    /// Scene origin
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Opaque handle to a live entity owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Template descriptor the host instantiates entities from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prefab {
    name: String,
}

impl Prefab {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Prefab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Placement context pooled entities are spawned at and parented under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holder {
    name: String,
    #[serde(default)]
    position: Position,
}

impl Holder {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

/// Engine operations a pool needs from the host
pub trait Scene {
    /// Create a new entity from `prefab` at `position`.
    fn instantiate(&mut self, prefab: &Prefab, position: Position) -> EntityId;

    /// Parent `entity` under `holder`.
    fn attach(&mut self, entity: EntityId, holder: &Holder);

    /// Toggle visibility and processing of `entity`.
    fn set_active(&mut self, entity: EntityId, active: bool);
}

/// Scene handle shared by every pool of a registry
pub type SharedScene = Rc<RefCell<dyn Scene>>;

/// Wrap a concrete scene so pools can share it.
///
/// Keep the returned `Rc<RefCell<S>>` to inspect the scene; pass a clone of
/// it wherever a [`SharedScene`] is expected.
pub fn share<S: Scene + 'static>(scene: S) -> Rc<RefCell<S>> {
    Rc::new(RefCell::new(scene))
}
