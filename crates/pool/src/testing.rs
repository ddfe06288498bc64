//! Testing utilities for pools and registries
//!
//! [`MockScene`] records every call a pool makes into the host, and the two
//! components cover both sides of the lifecycle capability: [`Tally`] counts
//! its hooks, [`Inert`] has none.

use core::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::poolable::{Component, Poolable};
use crate::scene::{EntityId, Holder, Position, Prefab, Scene};

/// One call made into the scene
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCall {
    Instantiate {
        prefab: String,
        position: Position,
        entity: EntityId,
    },
    Attach {
        entity: EntityId,
        holder: String,
    },
    SetActive {
        entity: EntityId,
        active: bool,
    },
}

/// Scene double that hands out sequential entity ids starting at 1
#[derive(Debug, Default)]
pub struct MockScene {
    next_id: u64,
    calls: Vec<SceneCall>,
    active: HashMap<EntityId, bool>,
    parents: HashMap<EntityId, String>,
}

impl MockScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh scene behind the shared handle pools expect
    pub fn shared() -> Rc<RefCell<Self>> {
        crate::scene::share(Self::new())
    }

    pub fn calls(&self) -> &[SceneCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of entities created so far
    pub fn instantiated(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, SceneCall::Instantiate { .. }))
            .count()
    }

    pub fn is_active(&self, entity: EntityId) -> Option<bool> {
        self.active.get(&entity).copied()
    }

    pub fn parent_of(&self, entity: EntityId) -> Option<&str> {
        self.parents.get(&entity).map(String::as_str)
    }
}

impl Scene for MockScene {
    fn instantiate(&mut self, prefab: &Prefab, position: Position) -> EntityId {
        self.next_id += 1;
        let entity = EntityId::from_raw(self.next_id);
        self.active.insert(entity, true);
        self.calls.push(SceneCall::Instantiate {
            prefab: prefab.name().to_string(),
            position,
            entity,
        });
        entity
    }

    fn attach(&mut self, entity: EntityId, holder: &Holder) {
        self.parents.insert(entity, holder.name().to_string());
        self.calls.push(SceneCall::Attach {
            entity,
            holder: holder.name().to_string(),
        });
    }

    fn set_active(&mut self, entity: EntityId, active: bool) {
        self.active.insert(entity, active);
        self.calls.push(SceneCall::SetActive { entity, active });
    }
}

/// Component that counts its lifecycle hooks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub entity: EntityId,
    pub inits: u32,
    pub resets: u32,
}

impl Component for Tally {
    fn from_entity(entity: EntityId) -> Self {
        Self {
            entity,
            inits: 0,
            resets: 0,
        }
    }

    fn entity(&self) -> EntityId {
        self.entity
    }

    fn as_poolable(&mut self) -> Option<&mut dyn Poolable> {
        Some(self)
    }
}

impl Poolable for Tally {
    fn init(&mut self) {
        self.inits += 1;
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

/// Component without lifecycle hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inert {
    pub entity: EntityId,
}

impl Component for Inert {
    fn from_entity(entity: EntityId) -> Self {
        Self { entity }
    }

    fn entity(&self) -> EntityId {
        self.entity
    }
}
