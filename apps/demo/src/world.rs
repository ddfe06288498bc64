//! Headless scene: entities are plain records, nothing is rendered.

use std::collections::BTreeMap;

use recycle_pool::{EntityId, Holder, Position, Prefab, Scene};

#[derive(Debug, Clone)]
pub struct EntityRecord {
    pub prefab: String,
    pub position: Position,
    pub parent: Option<String>,
    pub active: bool,
}

/// Scene that only keeps track of what exists
#[derive(Debug, Default)]
pub struct HeadlessWorld {
    next_id: u64,
    entities: BTreeMap<EntityId, EntityRecord>,
}

impl HeadlessWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities ever created
    pub fn spawned(&self) -> usize {
        self.entities.len()
    }

    /// Entities currently active
    pub fn live(&self) -> usize {
        self.entities.values().filter(|e| e.active).count()
    }

    pub fn get(&self, entity: EntityId) -> Option<&EntityRecord> {
        self.entities.get(&entity)
    }

    /// Instantiated entities of one prefab
    pub fn count_of(&self, prefab: &str) -> usize {
        self.entities.values().filter(|e| e.prefab == prefab).count()
    }
}

impl Scene for HeadlessWorld {
    fn instantiate(&mut self, prefab: &Prefab, position: Position) -> EntityId {
        self.next_id += 1;
        let entity = EntityId::from_raw(self.next_id);
        self.entities.insert(
            entity,
            EntityRecord {
                prefab: prefab.name().to_string(),
                position,
                parent: None,
                active: true,
            },
        );
        entity
    }

    fn attach(&mut self, entity: EntityId, holder: &Holder) {
        if let Some(record) = self.entities.get_mut(&entity) {
            record.parent = Some(holder.name().to_string());
        }
    }

    fn set_active(&mut self, entity: EntityId, active: bool) {
        if let Some(record) = self.entities.get_mut(&entity) {
            record.active = active;
        }
    }
}
