//! Render queue for translucency-aware ordering
//!
//! Splits the live entities into an opaque pass and a translucent pass.
//! Opaque entries keep collection order since they write depth. Translucent
//! entries are sorted back-to-front by distance from the camera to each
//! entity's origin, the painter's-algorithm substitute for order-independent
//! transparency.

use crate::foundation::collections::EntityId;
use crate::foundation::math::Vec3;

/// What the queue needs to know about one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem {
    /// Entity handle
    pub id: EntityId,
    /// Whether it draws in the blended pass
    pub translucent: bool,
    /// Position used for distance sorting
    pub position: Vec3,
}

/// Ordered draw list for a frame
#[derive(Debug, Default, Clone)]
pub struct RenderQueue {
    /// Opaque entities in collection order
    opaque: Vec<EntityId>,

    /// Translucent entities with their camera distance, farthest first
    translucent: Vec<(EntityId, f32)>,
}

impl RenderQueue {
    /// Create an empty render queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition and sort items relative to `camera_position`
    pub fn build<I>(items: I, camera_position: Vec3) -> Self
    where
        I: IntoIterator<Item = RenderItem>,
    {
        let mut queue = Self::new();

        for item in items {
            if item.translucent {
                let distance = (item.position - camera_position).norm();
                queue.translucent.push((item.id, distance));
            } else {
                queue.opaque.push(item.id);
            }
        }

        // Back-to-front; stable so equal distances keep collection order
        queue.translucent.sort_by(|a, b| b.1.total_cmp(&a.1));

        queue
    }

    /// Opaque entities
    pub fn opaque(&self) -> &[EntityId] {
        &self.opaque
    }

    /// Translucent entities with their distances, farthest first
    pub fn translucent(&self) -> &[(EntityId, f32)] {
        &self.translucent
    }

    /// Full draw order: every opaque entity, then the sorted translucent ones
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.opaque
            .iter()
            .copied()
            .chain(self.translucent.iter().map(|(id, _)| *id))
    }

    /// Total number of entities in the queue
    pub fn len(&self) -> usize {
        self.opaque.len() + self.translucent.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
