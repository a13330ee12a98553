//! Per-entity update context
//!
//! What an entity may touch while it updates: the camera, environment and
//! clock read-only, other entities read-only (for parent matrices), the
//! scene's seeded random generator, and a spawn sink that inserts new
//! entities without disturbing the pass in progress.

use super::entity::Entity;
use super::store::EntityStore;
use crate::foundation::collections::EntityId;
use crate::foundation::math::Mat4;
use crate::foundation::random::StdRng;
use crate::render::{Camera, Environment};

/// Borrowed scene state handed to [`Entity::update`]
pub struct UpdateContext<'a> {
    pub(crate) id: EntityId,
    pub(crate) time: f32,
    pub(crate) camera: &'a Camera,
    pub(crate) environment: &'a Environment,
    pub(crate) store: &'a mut EntityStore,
    pub(crate) spawned: &'a mut Vec<EntityId>,
    pub(crate) rng: &'a mut StdRng,
}

impl<'a> UpdateContext<'a> {
    /// Handle of the entity being updated
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Global elapsed time, already advanced for this frame
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Camera, already updated for this frame
    pub fn camera(&self) -> &Camera {
        self.camera
    }

    /// Lights and fog for this frame
    pub fn environment(&self) -> &Environment {
        self.environment
    }

    /// Whether `id` is still in the scene
    pub fn contains(&self, id: EntityId) -> bool {
        self.store.contains(id)
    }

    /// Read another entity
    pub fn entity(&self, id: EntityId) -> Option<&dyn Entity> {
        self.store.get(id)
    }

    /// Current world matrix of another entity
    pub fn world_matrix(&self, id: EntityId) -> Option<Mat4> {
        self.store.world_matrix(id)
    }

    /// Scene random generator
    pub fn rng(&mut self) -> &mut StdRng {
        self.rng
    }

    /// Add an entity to the scene
    ///
    /// The handle is valid immediately, so it can serve as the parent of a
    /// later spawn. The new entity first updates on the next frame.
    pub fn spawn(&mut self, entity: Box<dyn Entity>) -> EntityId {
        let name = entity.name();
        let id = self.store.insert_unscheduled(entity);
        self.spawned.push(id);
        log::trace!("Spawned {} {:?}", name, id);
        id
    }
}
