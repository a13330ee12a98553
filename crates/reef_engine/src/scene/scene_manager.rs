//! Scene Manager - owns entities, camera and environment
//!
//! One frame is one [`Scene::update`] followed by one [`Scene::render`]:
//!
//! 1. Advance global time, update the camera along its path.
//! 2. Recompute lights and fog from time and the camera pose.
//! 3. Update every entity in order. Entities that report expiry are removed
//!    on the spot; survivors get their world matrix recomposed against their
//!    parent's current-frame matrix. Entities spawned during the pass join
//!    the order afterwards.
//! 4. Render opaque entities, then translucent ones farthest first.
//!
//! A child whose parent no longer resolves is removed along with it.

use super::context::UpdateContext;
use super::entity::Entity;
use super::store::EntityStore;
use crate::config::SceneConfig;
use crate::foundation::collections::EntityId;
use crate::foundation::random::{self, StdRng};
use crate::render::{
    Camera, Environment, FrameSnapshot, RenderBackend, RenderContext, RenderItem, RenderQueue,
    RenderState, ResourceCache, ResourceError, ResourceProvider,
};

/// Scene construction and population errors
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// A visual resource could not be loaded
    #[error("resource error: {0}")]
    Resource(#[from] ResourceError),

    /// The populator could not build the scene
    #[error("population failed: {0}")]
    Population(String),
}

/// Builds the initial set of entities
///
/// Called on first population and again after every [`Scene::reset`].
pub trait ScenePopulator {
    /// Add entities to an empty scene
    fn populate(&mut self, scene: &mut Scene) -> Result<(), SceneError>;
}

/// Counters from one update pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpdateStats {
    /// Entities whose update ran
    pub updated: usize,
    /// Entities that reported expiry
    pub expired: usize,
    /// Entities removed because their parent was gone
    pub orphaned: usize,
    /// Entities spawned during the pass
    pub spawned: usize,
}

/// Counters from one render pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    /// Entities rendered in the opaque pass
    pub opaque: usize,
    /// Entities rendered in the translucent pass
    pub translucent: usize,
    /// Entities whose render returned an error
    pub failed: usize,
    /// Entities that left the backend in a non-opaque state
    pub leaked_state: usize,
}

/// The live scene
pub struct Scene {
    config: SceneConfig,
    camera: Camera,
    environment: Environment,
    store: EntityStore,
    resources: ResourceCache,
    rng: StdRng,
    time: f32,
    frame: u64,
}

impl Scene {
    /// Create an empty scene
    pub fn new(config: SceneConfig, provider: Box<dyn ResourceProvider>) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("Scene configuration is invalid, continuing anyway: {}", e);
        }

        let camera = Camera::new(&config.camera);
        let mut environment = Environment::new(config.environment.clone());
        environment.update(0.0, camera.position, camera.target);

        log::info!("Scene created with seed {}", config.seed);
        Self {
            rng: random::seeded(config.seed),
            camera,
            environment,
            store: EntityStore::new(),
            resources: ResourceCache::new(provider),
            config,
            time: 0.0,
            frame: 0,
        }
    }

    /// Add an entity at the end of the update order
    ///
    /// Parents must be added before the children that read their matrix.
    /// The world matrix is composed right away so the entity can be drawn
    /// before its first update.
    pub fn add(&mut self, entity: Box<dyn Entity>) -> EntityId {
        let name = entity.name();
        let id = self.store.insert(entity);
        self.compose_world(id);
        log::trace!("Added {} {:?}", name, id);
        id
    }

    /// Remove an entity; its children go with it on the next update
    pub fn remove(&mut self, id: EntityId) -> Option<Box<dyn Entity>> {
        self.store.remove(id)
    }

    /// Run `populator` against this scene
    pub fn populate(&mut self, populator: &mut dyn ScenePopulator) -> Result<(), SceneError> {
        populator.populate(self)?;
        log::info!("Scene populated with {} entities", self.store.len());
        Ok(())
    }

    /// Discard everything and rebuild the initial population
    ///
    /// Clears entities and the resource cache, rewinds time and the camera
    /// path, and reseeds the random generator so the rebuilt scene matches
    /// the first one.
    pub fn reset(&mut self, populator: &mut dyn ScenePopulator) -> Result<(), SceneError> {
        log::info!("Resetting scene ({} entities discarded)", self.store.len());
        self.store.clear();
        self.resources.clear();
        self.time = 0.0;
        self.frame = 0;
        self.rng = random::seeded(self.config.seed);
        self.camera.reset_animation();
        self.camera.update(0.0);
        self.environment.update(0.0, self.camera.position, self.camera.target);
        self.populate(populator)
    }

    /// Advance the scene by `dt` seconds
    ///
    /// Negative or non-finite deltas count as zero. With a zero delta state
    /// is frozen but world matrices are still recomposed.
    pub fn update(&mut self, dt: f32) -> UpdateStats {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.time += dt;
        self.frame += 1;
        self.camera.update(dt);
        self.environment.update(self.time, self.camera.position, self.camera.target);

        let mut stats = UpdateStats::default();
        let order = self.store.take_order();
        let mut survivors = Vec::with_capacity(order.len());
        let mut spawned = Vec::new();

        for id in order {
            let Some(mut entity) = self.store.take(id) else {
                continue;
            };

            if let Some(parent) = entity.node().parent {
                if !self.store.contains(parent) {
                    log::debug!("Removing {} {:?}: parent {:?} is gone", entity.name(), id, parent);
                    self.store.remove_slot(id);
                    stats.orphaned += 1;
                    continue;
                }
            }

            let alive = {
                let mut ctx = UpdateContext {
                    id,
                    time: self.time,
                    camera: &self.camera,
                    environment: &self.environment,
                    store: &mut self.store,
                    spawned: &mut spawned,
                    rng: &mut self.rng,
                };
                entity.update(&mut ctx, dt)
            };
            stats.updated += 1;

            if alive {
                let parent_world = entity.node().parent.and_then(|parent| self.store.world_matrix(parent));
                entity.node_mut().update_world(parent_world.as_ref());
                self.store.restore(id, entity);
                survivors.push(id);
            } else {
                log::trace!("{} {:?} expired", entity.name(), id);
                self.store.remove_slot(id);
                stats.expired += 1;
            }
        }

        // Spawn order puts parents first, so nested spawns compose correctly
        for &id in &spawned {
            self.compose_world(id);
        }
        stats.spawned = spawned.len();
        survivors.extend(spawned);
        self.store.set_order(survivors);
        stats.orphaned += self.remove_orphans();

        if stats.expired > 0 || stats.orphaned > 0 || stats.spawned > 0 {
            log::debug!(
                "Frame {}: {} expired, {} orphaned, {} spawned, {} live",
                self.frame,
                stats.expired,
                stats.orphaned,
                stats.spawned,
                self.store.len()
            );
        }
        stats
    }

    /// Recompose one entity's world matrix against its parent's current one
    fn compose_world(&mut self, id: EntityId) {
        let parent_world = self
            .store
            .get(id)
            .and_then(|entity| entity.node().parent)
            .and_then(|parent| self.store.world_matrix(parent));
        if let Some(entity) = self.store.get_mut(id) {
            entity.node_mut().update_world(parent_world.as_ref());
        }
    }

    /// Remove entities whose parent no longer resolves, transitively
    fn remove_orphans(&mut self) -> usize {
        let mut removed = 0;
        loop {
            let orphans: Vec<EntityId> = self
                .store
                .iter()
                .filter(|(_, entity)| entity.node().parent.is_some_and(|parent| !self.store.contains(parent)))
                .map(|(id, _)| id)
                .collect();
            if orphans.is_empty() {
                return removed;
            }
            for id in orphans {
                log::debug!("Removing orphan {:?}", id);
                self.store.remove(id);
                removed += 1;
            }
        }
    }

    /// Snapshot of camera, lights, fog and time for renderers
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            view: *self.camera.view(),
            projection: *self.camera.projection(),
            camera_position: self.camera.position,
            sun: self.environment.sun,
            point: self.environment.point,
            spot: self.environment.spot,
            fog: self.environment.fog,
            time: self.time,
        }
    }

    /// Draw order for the current state
    pub fn build_render_queue(&self) -> RenderQueue {
        let items = self
            .store
            .iter()
            .filter(|(_, entity)| entity.is_visible())
            .map(|(id, entity)| RenderItem {
                id,
                translucent: entity.is_translucent(),
                position: entity.node().world_position(),
            });
        RenderQueue::build(items, self.camera.position)
    }

    /// Render opaque entities, then translucent ones back to front
    ///
    /// A failing entity is logged and skipped. An entity that leaves blending
    /// or culling changed is logged and the opaque state is restored before
    /// the next one draws.
    pub fn render(&self, backend: &mut dyn RenderBackend) -> RenderStats {
        let snapshot = self.snapshot();
        let queue = self.build_render_queue();
        let mut stats = RenderStats::default();

        backend.set_render_state(RenderState::OPAQUE);

        let passes = queue
            .opaque()
            .iter()
            .map(|id| (*id, false))
            .chain(queue.translucent().iter().map(|(id, _)| (*id, true)));

        for (id, translucent) in passes {
            let Some(entity) = self.store.get(id) else {
                continue;
            };

            let mut ctx = RenderContext::new(&mut *backend, &snapshot);
            match entity.render(&mut ctx) {
                Ok(()) if translucent => stats.translucent += 1,
                Ok(()) => stats.opaque += 1,
                Err(e) => {
                    log::error!("Failed to render {} {:?}: {}", entity.name(), id, e);
                    stats.failed += 1;
                }
            }

            let state = backend.render_state();
            if state != RenderState::OPAQUE {
                log::warn!("{} {:?} left render state {:?}, restoring", entity.name(), id, state);
                backend.set_render_state(RenderState::OPAQUE);
                stats.leaked_state += 1;
            }
        }

        log::trace!(
            "Rendered {} opaque, {} translucent, {} failed",
            stats.opaque,
            stats.translucent,
            stats.failed
        );
        stats
    }

    /// Look up an entity
    pub fn get(&self, id: EntityId) -> Option<&dyn Entity> {
        self.store.get(id)
    }

    /// Look up an entity mutably
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut (dyn Entity + 'static)> {
        self.store.get_mut(id)
    }

    /// Whether `id` is live
    pub fn contains(&self, id: EntityId) -> bool {
        self.store.contains(id)
    }

    /// Entity handles in update order
    pub fn ids(&self) -> &[EntityId] {
        self.store.order()
    }

    /// Entities in update order
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &dyn Entity)> + '_ {
        self.store.iter()
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the scene has no entities
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Global elapsed time
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Frames updated since creation or reset
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera access, for installing a path or manual control
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Lights and fog
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Resource cache for building entities
    pub fn resources_mut(&mut self) -> &mut ResourceCache {
        &mut self.resources
    }

    /// Seeded random generator for building entities
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Configuration the scene was built with
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("entities", &self.store.len())
            .field("time", &self.time)
            .field("frame", &self.frame)
            .finish()
    }
}
