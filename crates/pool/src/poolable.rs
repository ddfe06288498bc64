//! Element contracts: component lookup and the optional lifecycle capability

use crate::scene::EntityId;

/// Lifecycle hooks an element may opt into
///
/// # Example
/// ```
/// use recycle_pool::Poolable;
///
/// struct Bullet {
///     damage: u32,
///     hits: Vec<u64>,
/// }
///
/// impl Poolable for Bullet {
///     fn init(&mut self) {
///         self.damage = 10;
///     }
///
///     fn reset(&mut self) {
///         self.hits.clear();
///     }
/// }
/// ```
pub trait Poolable {
    /// Called once, when the pool stocks the element.
    fn init(&mut self) {}

    /// Called on every release, before the element is queued again.
    ///
    /// It should clear any state that shouldn't persist between uses.
    fn reset(&mut self);
}

/// Typed view over a host entity that a pool can hand out
///
/// Elements that want lifecycle hooks return themselves from
/// [`as_poolable`](Component::as_poolable); everything else keeps the
/// default and is queued untouched.
///
/// # Example
/// ```
/// use recycle_pool::{Component, EntityId, Poolable};
///
/// struct Spark {
///     entity: EntityId,
///     age: u32,
/// }
///
/// impl Component for Spark {
///     fn from_entity(entity: EntityId) -> Self {
///         Self { entity, age: 0 }
///     }
///
///     fn entity(&self) -> EntityId {
///         self.entity
///     }
///
///     fn as_poolable(&mut self) -> Option<&mut dyn Poolable> {
///         Some(self)
///     }
/// }
///
/// impl Poolable for Spark {
///     fn reset(&mut self) {
///         self.age = 0;
///     }
/// }
/// ```
pub trait Component: 'static {
    /// Resolve the component on a freshly instantiated entity.
    fn from_entity(entity: EntityId) -> Self
    where
        Self: Sized;

    /// Entity this component lives on
    fn entity(&self) -> EntityId;

    /// Lifecycle capability, when the element supports it
    fn as_poolable(&mut self) -> Option<&mut dyn Poolable> {
        None
    }
}

/// Run the init hook if the element supports it.
pub(crate) fn init_element<T: Component>(element: &mut T) {
    if let Some(poolable) = element.as_poolable() {
        poolable.init();
    }
}

/// Run the reset hook if the element supports it.
pub(crate) fn reset_element<T: Component>(element: &mut T) {
    if let Some(poolable) = element.as_poolable() {
        poolable.reset();
    }
}
