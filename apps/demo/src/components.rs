//! Pooled components and the turret that owns the bullet pool.

use recycle_pool::{Component, EntityId, Poolable};

pub const BULLET_DAMAGE: u32 = 10;

/// Projectile fired by a turret
#[derive(Debug)]
pub struct Bullet {
    entity: EntityId,
    pub damage: u32,
    pub traveled: u32,
}

impl Component for Bullet {
    fn from_entity(entity: EntityId) -> Self {
        Self {
            entity,
            damage: 0,
            traveled: 0,
        }
    }

    fn entity(&self) -> EntityId {
        self.entity
    }

    fn as_poolable(&mut self) -> Option<&mut dyn Poolable> {
        Some(self)
    }
}

impl Poolable for Bullet {
    fn init(&mut self) {
        self.damage = BULLET_DAMAGE;
    }

    fn reset(&mut self) {
        self.traveled = 0;
    }
}

/// Impact effect; carries no state worth resetting
#[derive(Debug)]
pub struct Spark {
    entity: EntityId,
}

impl Component for Spark {
    fn from_entity(entity: EntityId) -> Self {
        Self { entity }
    }

    fn entity(&self) -> EntityId {
        self.entity
    }
}

/// Owner of the bullet pool
#[derive(Debug)]
pub struct Turret {
    pub name: String,
}
