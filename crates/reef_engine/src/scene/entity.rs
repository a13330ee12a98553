//! Entity contract
//!
//! Every piece of scene content implements [`Entity`]: an `update` that
//! mutates its own local state and reports whether it is still alive, and a
//! `render` that draws from the cached world matrix. The transform fields,
//! translucency flag and parent link live in a [`Node`] the scene can read
//! without knowing the concrete type.

use super::context::UpdateContext;
use crate::foundation::collections::EntityId;
use crate::foundation::math::{translation_of, Mat4, Transform, Vec3};
use crate::render::{RenderContext, RenderError};

/// Scene-visible state shared by all entities
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Local position, Euler rotation and scale
    pub transform: Transform,

    /// Drawn in the blended back-to-front pass
    pub translucent: bool,

    /// Non-owning link to the entity this one is attached to
    pub parent: Option<EntityId>,

    world_matrix: Mat4,
}

impl Default for Node {
    fn default() -> Self {
        Self::new(Transform::default())
    }
}

impl Node {
    /// Create a root node; its world matrix starts as the local matrix
    pub fn new(transform: Transform) -> Self {
        Self {
            world_matrix: transform.to_matrix(),
            transform,
            translucent: false,
            parent: None,
        }
    }

    /// Builder pattern: mark translucent
    pub fn translucent(mut self) -> Self {
        self.translucent = true;
        self
    }

    /// Builder pattern: attach to a parent
    pub fn with_parent(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// World matrix from the last composition
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// World-space origin of this node
    pub fn world_position(&self) -> Vec3 {
        translation_of(&self.world_matrix)
    }

    /// Recompose the world matrix as `parent_world * local`
    pub fn update_world(&mut self, parent_world: Option<&Mat4>) {
        self.world_matrix = self.transform.to_world_matrix(parent_world);
    }
}

/// Polymorphic unit of scene content
///
/// The scene calls `update` once per frame and, for survivors, recomposes
/// the node's world matrix against the parent's current-frame matrix right
/// afterwards. `render` runs later in translucency order and must leave the
/// backend in [`RenderState::OPAQUE`](crate::render::RenderState::OPAQUE).
pub trait Entity {
    /// Advance by `dt` seconds; return `false` to be removed
    fn update(&mut self, ctx: &mut UpdateContext<'_>, dt: f32) -> bool;

    /// Issue draws for the current frame
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError>;

    /// Transform, translucency and parent link
    fn node(&self) -> &Node;

    /// Mutable access to the node
    fn node_mut(&mut self) -> &mut Node;

    /// Which render pass this entity joins
    fn is_translucent(&self) -> bool {
        self.node().translucent
    }

    /// Whether this entity draws at all
    fn is_visible(&self) -> bool {
        true
    }

    /// Short name for log messages
    fn name(&self) -> &'static str {
        "entity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_node_has_local_world() {
        let node = Node::new(Transform::from_position(Vec3::new(1.0, 2.0, 3.0)));
        assert_relative_eq!(node.world_position(), Vec3::new(1.0, 2.0, 3.0));
        assert!(!node.translucent);
        assert!(node.parent.is_none());
    }

    #[test]
    fn test_update_world_uses_parent() {
        let mut node = Node::new(Transform::from_position(Vec3::new(1.0, 0.0, 0.0)));
        let parent = Mat4::new_translation(&Vec3::new(0.0, 10.0, 0.0));
        node.update_world(Some(&parent));
        assert_relative_eq!(node.world_position(), Vec3::new(1.0, 10.0, 0.0));

        node.update_world(None);
        assert_relative_eq!(node.world_position(), Vec3::new(1.0, 0.0, 0.0));
    }
}
