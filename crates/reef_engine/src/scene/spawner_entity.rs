//! Invisible entity that runs a [`Spawner`]

use super::context::UpdateContext;
use super::entity::{Entity, Node};
use crate::behavior::{SpawnFactory, Spawner};
use crate::config::SpawnerConfig;
use crate::foundation::collections::EntityId;
use crate::foundation::math::{Transform, Vec3};
use crate::render::{RenderContext, RenderError};

/// Periodically inserts entities built by a [`SpawnFactory`]
///
/// Never expires and never draws. Tracks the handles it created so that
/// `max_alive` counts only its own live spawns.
pub struct SpawnerEntity<F> {
    node: Node,
    spawner: Spawner,
    factory: F,
    alive: Vec<EntityId>,
}

impl<F: SpawnFactory> SpawnerEntity<F> {
    /// Create a spawner at `position`
    pub fn new(position: Vec3, config: SpawnerConfig, factory: F) -> Self {
        Self {
            node: Node::new(Transform::from_position(position)),
            spawner: Spawner::new(config),
            factory,
            alive: Vec::new(),
        }
    }

    /// Number of this spawner's entities still alive at its last update
    pub fn alive(&self) -> usize {
        self.alive.len()
    }

    /// The timer and settings
    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }
}

impl<F: SpawnFactory> Entity for SpawnerEntity<F> {
    fn update(&mut self, ctx: &mut UpdateContext<'_>, dt: f32) -> bool {
        self.alive.retain(|id| ctx.contains(*id));

        let origin = self.node.world_position();
        let batch = self.spawner.tick(ctx.rng(), dt, origin, self.alive.len());
        if !batch.is_empty() {
            log::debug!("Spawner {:?} releasing {} entities", ctx.id(), batch.len());
        }

        for params in batch {
            let entity = self.factory.create(params, ctx.rng());
            let id = ctx.spawn(entity);
            self.alive.push(id);
        }
        true
    }

    fn render(&self, _ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        Ok(())
    }

    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn is_visible(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "spawner"
    }
}
