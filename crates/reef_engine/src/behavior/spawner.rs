//! Bounded random spawning
//!
//! [`Spawner`] owns the timer and the randomization; it decides when a batch
//! is due and where each member goes. Turning [`SpawnParams`] into entities is
//! left to a [`SpawnFactory`], and inserting them into a scene to
//! [`SpawnerEntity`](crate::scene::SpawnerEntity).

use crate::config::SpawnerConfig;
use crate::foundation::math::Vec3;
use crate::foundation::random::{self, Rng, StdRng};
use crate::scene::Entity;

/// Slack for accumulated frame deltas, so ten steps of 0.1 reach 1.0
const TIMER_EPSILON: f32 = 1e-4;

/// Randomized initial state for one spawned entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    /// World position
    pub position: Vec3,
    /// Lifetime in seconds
    pub lifetime: f32,
    /// Uniform size
    pub size: f32,
}

/// Builds entities from spawn parameters
pub trait SpawnFactory {
    /// Create one entity
    fn create(&mut self, params: SpawnParams, rng: &mut StdRng) -> Box<dyn Entity>;
}

/// Timer and randomization for periodic batches
#[derive(Debug, Clone)]
pub struct Spawner {
    config: SpawnerConfig,
    timer: f32,
}

impl Spawner {
    /// Create a spawner with an empty timer
    pub fn new(config: SpawnerConfig) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("Spawner configured with questionable settings: {}", e);
        }
        Self { config, timer: 0.0 }
    }

    /// Settings in use
    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    /// Time accumulated towards the next batch
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Advance the timer and return the batch that is due, if any
    ///
    /// `alive` is how many earlier spawns are still in the scene; the batch
    /// is shortened so that it never exceeds `max_alive`.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, dt: f32, origin: Vec3, alive: usize) -> Vec<SpawnParams> {
        self.timer += dt.max(0.0);
        if self.config.interval <= 0.0 || self.timer + TIMER_EPSILON < self.config.interval {
            return Vec::new();
        }
        self.timer = 0.0;

        let room = self
            .config
            .max_alive
            .map_or(self.config.batch_size, |max| max.saturating_sub(alive));
        let count = self.config.batch_size.min(room);

        (0..count).map(|_| self.sample(rng, origin)).collect()
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R, origin: Vec3) -> SpawnParams {
        let (lifetime_min, lifetime_max) = self.config.lifetime;
        let (size_min, size_max) = self.config.size;
        SpawnParams {
            position: origin + random::disk_offset(rng, self.config.radius),
            lifetime: random::range(rng, lifetime_min, lifetime_max),
            size: random::range(rng, size_min, size_max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::random::seeded;

    fn config() -> SpawnerConfig {
        SpawnerConfig {
            interval: 1.0,
            batch_size: 3,
            radius: 4.0,
            lifetime: (8.0, 14.0),
            size: (0.05, 0.2),
            max_alive: None,
        }
    }

    #[test]
    fn test_batch_due_on_tenth_step() {
        let mut rng = seeded(9);
        let mut spawner = Spawner::new(config());
        let origin = Vec3::new(0.0, -9.0, 0.0);

        for step in 1..=10 {
            let batch = spawner.tick(&mut rng, 0.1, origin, 0);
            if step < 10 {
                assert!(batch.is_empty(), "spawned early at step {}", step);
            } else {
                assert_eq!(batch.len(), 3);
                for params in &batch {
                    assert!((params.position - origin).norm() <= 4.0 + 1e-4);
                    assert!((8.0..14.0).contains(&params.lifetime));
                    assert!((0.05..0.2).contains(&params.size));
                }
            }
        }
        assert_eq!(spawner.timer(), 0.0);
    }

    #[test]
    fn test_max_alive_caps_batch() {
        let mut rng = seeded(2);
        let mut spawner = Spawner::new(SpawnerConfig {
            max_alive: Some(4),
            ..config()
        });
        assert_eq!(spawner.tick(&mut rng, 1.0, Vec3::zeros(), 2).len(), 2);
        assert!(spawner.tick(&mut rng, 1.0, Vec3::zeros(), 4).is_empty());
    }

    #[test]
    fn test_paused_spawner_waits() {
        let mut rng = seeded(2);
        let mut spawner = Spawner::new(config());
        for _ in 0..100 {
            assert!(spawner.tick(&mut rng, 0.0, Vec3::zeros(), 0).is_empty());
        }
    }
}
