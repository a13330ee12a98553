//! # Reef Engine
//!
//! Scene management for animated, camera-toured 3D scenes with many
//! independently behaving entities.
//!
//! ## Features
//!
//! - **Entity Lifecycle**: Trait-object entities with stable handles, self-reported
//!   expiry and safe spawning during the update pass
//! - **Transform Hierarchy**: Parent links by handle, with cascade removal of orphans
//! - **Translucency Ordering**: Opaque pass first, then blended entities back to front
//! - **Camera Paths**: Looping, smoothstep-eased keyframe animation
//! - **Procedural Behaviors**: Phase oscillation, target-seeking yaw and bounded spawning
//! - **Environment**: Time-driven lights and depth-dependent fog
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reef_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     reef_engine::foundation::logging::init();
//!
//!     let mut scene = Scene::new(SceneConfig::default(), Box::new(HeadlessProvider::new()));
//!     let mut backend = RecordingBackend::new();
//!     let mut clock = FrameClock::fixed_step(1.0 / 60.0);
//!
//!     for _ in 0..600 {
//!         scene.update(clock.tick());
//!         scene.render(&mut backend);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod behavior;
pub mod config;
pub mod foundation;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        behavior::{Lifetime, PhaseOscillator, School, SpawnFactory, SpawnParams, Spawner, YawSteering},
        config::{Config, ConfigError, SceneConfig, SpawnerConfig},
        foundation::{
            collections::EntityId,
            math::{Mat4, Mat4Ext, Transform, Vec3, Vec4},
            random::{Rng, StdRng},
            time::FrameClock,
        },
        render::{
            Camera, CameraPath, DrawCommand, HeadlessProvider, Keyframe, RecordingBackend, RenderBackend,
            RenderContext, RenderError, RenderState, ResourceCache, ResourceProvider, VisualResources,
        },
        scene::{Entity, Node, Scene, SceneError, ScenePopulator, SpawnerEntity, UpdateContext},
    };
}
