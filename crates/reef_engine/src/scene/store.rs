//! Entity storage with stable handles
//!
//! Entities live in a slot map so an [`EntityId`] stays valid while other
//! entities come and go, and never resolves to a different entity after its
//! own removal. Update order is a separate list. During an entity's update its
//! box is taken out of the slot, which leaves the rest of the store free to be
//! read and appended to.

use super::entity::Entity;
use crate::foundation::collections::{EntityId, EntityMap};
use crate::foundation::math::Mat4;

/// Owned entities plus their update order
#[derive(Default)]
pub struct EntityStore {
    slots: EntityMap<Option<Box<dyn Entity>>>,
    order: Vec<EntityId>,
}

impl EntityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert and schedule at the end of the update order
    pub fn insert(&mut self, entity: Box<dyn Entity>) -> EntityId {
        let id = self.slots.insert(Some(entity));
        self.order.push(id);
        id
    }

    /// Insert without scheduling; the caller appends the id to the order later
    pub(crate) fn insert_unscheduled(&mut self, entity: Box<dyn Entity>) -> EntityId {
        self.slots.insert(Some(entity))
    }

    /// Whether `id` refers to a live entity, including one that is mid-update
    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.contains_key(id)
    }

    /// Borrow an entity; `None` if removed or currently updating
    pub fn get(&self, id: EntityId) -> Option<&dyn Entity> {
        self.slots.get(id).and_then(|slot| slot.as_deref())
    }

    /// Mutably borrow an entity
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut (dyn Entity + 'static)> {
        self.slots.get_mut(id).and_then(|slot| slot.as_deref_mut())
    }

    /// World matrix of a resolvable entity
    pub fn world_matrix(&self, id: EntityId) -> Option<Mat4> {
        self.get(id).map(|entity| *entity.node().world_matrix())
    }

    pub(crate) fn take(&mut self, id: EntityId) -> Option<Box<dyn Entity>> {
        self.slots.get_mut(id).and_then(Option::take)
    }

    pub(crate) fn restore(&mut self, id: EntityId, entity: Box<dyn Entity>) {
        if let Some(slot) = self.slots.get_mut(id) {
            *slot = Some(entity);
        }
    }

    /// Remove an entity, dropping it
    pub fn remove(&mut self, id: EntityId) -> Option<Box<dyn Entity>> {
        self.order.retain(|other| *other != id);
        self.slots.remove(id).flatten()
    }

    pub(crate) fn take_order(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.order)
    }

    pub(crate) fn set_order(&mut self, order: Vec<EntityId>) {
        self.order = order;
    }

    pub(crate) fn remove_slot(&mut self, id: EntityId) {
        self.slots.remove(id);
    }

    /// Update order
    pub fn order(&self) -> &[EntityId] {
        &self.order
    }

    /// Entities in update order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &dyn Entity)> + '_ {
        self.order.iter().filter_map(|id| self.get(*id).map(|entity| (*id, entity)))
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop every entity
    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
    }
}

impl std::fmt::Debug for EntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("len", &self.slots.len())
            .field("order", &self.order.len())
            .finish()
    }
}
