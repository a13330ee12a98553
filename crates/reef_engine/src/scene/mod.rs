//! Scene management
//!
//! The entity contract, handle-stable storage, the update context handed to
//! entities, and the [`Scene`] that drives update and render passes.

pub mod context;
pub mod entity;
pub mod scene_manager;
pub mod spawner_entity;
pub mod store;

#[cfg(test)]
mod tests;

pub use context::UpdateContext;
pub use entity::{Entity, Node};
pub use scene_manager::{RenderStats, Scene, SceneError, ScenePopulator, UpdateStats};
pub use spawner_entity::SpawnerEntity;
pub use store::EntityStore;
