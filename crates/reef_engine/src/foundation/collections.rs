//! Specialized collection types

pub use slotmap::{SecondaryMap, SlotMap};

slotmap::new_key_type! {
    /// Stable handle to an entity in a scene
    ///
    /// Remains valid while the entity lives, regardless of other insertions
    /// or removals, and never resolves to a different entity after removal.
    pub struct EntityId;
}

/// Handle-keyed map for entity storage
pub type EntityMap<T> = SlotMap<EntityId, T>;
