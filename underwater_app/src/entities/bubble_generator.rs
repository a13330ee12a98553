//! Seabed bubble source

use reef_engine::behavior::{SpawnFactory, SpawnParams};
use reef_engine::config::SpawnerConfig;
use reef_engine::foundation::math::Vec3;
use reef_engine::foundation::random::StdRng;
use reef_engine::render::VisualResources;
use reef_engine::scene::{Entity, SpawnerEntity};

use super::Bubble;

/// Invisible spawner releasing [`Bubble`]s
pub type BubbleGenerator = SpawnerEntity<BubbleFactory>;

/// Builds bubbles with shared visuals
#[derive(Debug, Clone, Copy)]
pub struct BubbleFactory {
    resources: VisualResources,
}

impl BubbleFactory {
    /// Create a factory drawing bubbles with `resources`
    pub fn new(resources: VisualResources) -> Self {
        Self { resources }
    }

    /// Wrap this factory in a generator at `position`
    pub fn generator(self, position: Vec3, config: SpawnerConfig) -> BubbleGenerator {
        SpawnerEntity::new(position, config, self)
    }
}

impl SpawnFactory for BubbleFactory {
    fn create(&mut self, params: SpawnParams, rng: &mut StdRng) -> Box<dyn Entity> {
        Box::new(Bubble::new(rng, params, self.resources))
    }
}
