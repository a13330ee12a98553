//! Shared procedural behaviors
//!
//! Small state machines composed into entities: phase oscillation,
//! target-seeking yaw, bounded spawning and lifetime tracking.

pub mod lifetime;
pub mod oscillation;
pub mod spawner;
pub mod steering;

pub use lifetime::Lifetime;
pub use oscillation::PhaseOscillator;
pub use spawner::{SpawnFactory, SpawnParams, Spawner};
pub use steering::{heading, normalize_angle, yaw_towards, School, YawSteering};
