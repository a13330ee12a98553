//! Initial reef population
//!
//! Every group of entities is described by data in [`PopulationConfig`], so
//! a config file can thin out or rearrange the reef without code changes.
//! Positions and sizes are drawn from the scene's seeded generator, which
//! makes a reset rebuild the same reef.

use reef_engine::config::{Config, ConfigError, SpawnerConfig};
use reef_engine::foundation::math::Vec3;
use reef_engine::foundation::random;
use reef_engine::scene::{Scene, SceneError, ScenePopulator};
use serde::{Deserialize, Serialize};

use crate::entities::{
    assets, BubbleFactory, Fish, Fish1, FishFin, Ground, Jellyfish, Rock, Seaweed, Skybox, WaterSurface,
};
use crate::entities::ground::SEABED_HEIGHT;

/// Fin offsets in fish space, left and right
const FIN_OFFSETS: [Vec3; 2] = [Vec3::new(-0.3, 0.15, 0.0), Vec3::new(0.3, 0.15, 0.0)];

/// A school of swimming fish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolGroup {
    /// Number of fish
    pub count: usize,
    /// Whether each fish gets a pair of flapping fins
    pub fins: bool,
    /// School center the fish return to
    pub center: Vec3,
    /// Full extents of the starting box around the center
    pub spread: Vec3,
    /// Uniform scale range
    pub scale: (f32, f32),
    /// Swim speed range
    pub speed: (f32, f32),
}

/// A drifting group of jellyfish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JellyfishGroup {
    /// Number of jellyfish
    pub count: usize,
    /// Opacity shared by the group
    pub transparency: f32,
    /// Group center
    pub center: Vec3,
    /// Full extents of the starting box around the center
    pub spread: Vec3,
    /// Bell size range
    pub size: (f32, f32),
}

/// Rocks scattered over a patch of seabed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RockGroup {
    /// Number of rocks
    pub count: usize,
    /// Height ratio of each rock
    pub flatten: f32,
    /// Height of a zero-sized rock's origin
    pub base_height: f32,
    /// Extra height per unit of size, so larger rocks are not buried
    pub lift: f32,
    /// Patch center; only X and Z are used
    pub center: Vec3,
    /// Full X and Z extents of the patch
    pub spread: Vec3,
    /// Width range
    pub size: (f32, f32),
}

/// Seaweed scattered near the camera path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeaweedField {
    /// Number of strands
    pub count: usize,
    /// Full X and Z extent of the square field around the origin
    pub extent: f32,
    /// Strand height range
    pub height: (f32, f32),
}

/// Where bubbles come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleSource {
    /// Generator position
    pub position: Vec3,
    /// Spawn timing and ranges
    pub spawner: SpawnerConfig,
}

/// Everything placed in the scene at startup and on reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Draw the background cube
    pub skybox: bool,
    /// Seabed plane
    pub ground: bool,
    /// Translucent surface following the camera
    pub water_surface: bool,
    /// Finned reef fish
    pub fish_schools: Vec<SchoolGroup>,
    /// Second species
    pub fish1_schools: Vec<SchoolGroup>,
    /// Seaweed strands
    pub seaweed: SeaweedField,
    /// Rock patches
    pub rocks: Vec<RockGroup>,
    /// Jellyfish groups
    pub jellyfish: Vec<JellyfishGroup>,
    /// Bubble generator, if any
    pub bubbles: Option<BubbleSource>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            skybox: true,
            ground: true,
            water_surface: true,
            fish_schools: vec![
                SchoolGroup {
                    count: 8,
                    fins: true,
                    center: Vec3::new(0.0, -10.0, 0.0),
                    spread: Vec3::new(10.0, 3.0, 10.0),
                    scale: (0.4, 0.6),
                    speed: (6.0, 8.0),
                },
                SchoolGroup {
                    count: 6,
                    fins: false,
                    center: Vec3::new(-30.0, -9.0, -20.0),
                    spread: Vec3::new(8.0, 2.0, 8.0),
                    scale: (0.5, 0.8),
                    speed: (5.0, 8.0),
                },
                SchoolGroup {
                    count: 7,
                    fins: false,
                    center: Vec3::new(25.0, -11.0, 15.0),
                    spread: Vec3::new(12.0, 2.0, 12.0),
                    scale: (0.6, 0.8),
                    speed: (7.0, 9.0),
                },
            ],
            fish1_schools: vec![
                SchoolGroup {
                    count: 6,
                    fins: false,
                    center: Vec3::new(10.0, -10.0, -40.0),
                    spread: Vec3::new(12.0, 4.0, 12.0),
                    scale: (0.5, 0.8),
                    speed: (5.0, 7.0),
                },
                SchoolGroup {
                    count: 5,
                    fins: false,
                    center: Vec3::new(-20.0, -9.0, -15.0),
                    spread: Vec3::new(10.0, 3.0, 10.0),
                    scale: (0.6, 0.8),
                    speed: (4.5, 7.0),
                },
            ],
            seaweed: SeaweedField {
                count: 50,
                extent: 60.0,
                height: (0.12, 0.3),
            },
            rocks: vec![
                // Large rocks across the whole seabed
                RockGroup {
                    count: 20,
                    flatten: 0.7,
                    base_height: -14.5,
                    lift: 0.3,
                    center: Vec3::zeros(),
                    spread: Vec3::new(200.0, 0.0, 200.0),
                    size: (0.4, 1.0),
                },
                RockGroup {
                    count: 8,
                    flatten: 0.8,
                    base_height: -14.6,
                    lift: 0.0,
                    center: Vec3::new(15.0, 0.0, 20.0),
                    spread: Vec3::new(15.0, 0.0, 15.0),
                    size: (0.3, 0.7),
                },
                RockGroup {
                    count: 6,
                    flatten: 0.8,
                    base_height: -14.6,
                    lift: 0.0,
                    center: Vec3::new(-35.0, 0.0, -10.0),
                    spread: Vec3::new(12.0, 0.0, 12.0),
                    size: (0.3, 0.7),
                },
                RockGroup {
                    count: 10,
                    flatten: 0.6,
                    base_height: -14.5,
                    lift: 0.3,
                    center: Vec3::new(0.0, 0.0, -50.0),
                    spread: Vec3::new(60.0, 0.0, 20.0),
                    size: (0.5, 1.0),
                },
            ],
            jellyfish: vec![
                JellyfishGroup {
                    count: 4,
                    transparency: 0.7,
                    center: Vec3::new(-25.0, -7.0, -60.0),
                    spread: Vec3::new(12.0, 4.0, 12.0),
                    size: (0.9, 1.3),
                },
                JellyfishGroup {
                    count: 5,
                    transparency: 0.65,
                    center: Vec3::new(5.0, -6.0, -70.0),
                    spread: Vec3::new(18.0, 5.0, 15.0),
                    size: (1.0, 1.6),
                },
                JellyfishGroup {
                    count: 4,
                    transparency: 0.75,
                    center: Vec3::new(30.0, -8.0, -55.0),
                    spread: Vec3::new(10.0, 4.0, 10.0),
                    size: (0.8, 1.3),
                },
            ],
            bubbles: Some(BubbleSource {
                position: Vec3::new(0.0, -9.0, 0.0),
                spawner: SpawnerConfig {
                    interval: 0.015,
                    batch_size: 3,
                    radius: 50.0,
                    ..SpawnerConfig::default()
                },
            }),
        }
    }
}

impl Config for PopulationConfig {}

fn check_range(what: &str, range: (f32, f32)) -> Result<(), ConfigError> {
    if range.0 > range.1 || !range.0.is_finite() || !range.1.is_finite() {
        return Err(ConfigError::Invalid(format!("{} range {:?} is not ordered", what, range)));
    }
    Ok(())
}

impl PopulationConfig {
    /// Validate ranges and the bubble spawner
    pub fn validate(&self) -> Result<(), ConfigError> {
        for school in self.fish_schools.iter().chain(&self.fish1_schools) {
            check_range("school scale", school.scale)?;
            check_range("school speed", school.speed)?;
        }
        check_range("seaweed height", self.seaweed.height)?;
        for group in &self.rocks {
            check_range("rock size", group.size)?;
        }
        for group in &self.jellyfish {
            check_range("jellyfish size", group.size)?;
            if !(0.0..=1.0).contains(&group.transparency) {
                return Err(ConfigError::Invalid(format!(
                    "jellyfish transparency must be in [0, 1], got {}",
                    group.transparency
                )));
            }
        }
        if let Some(source) = &self.bubbles {
            source.spawner.validate()?;
        }
        Ok(())
    }

    /// Number of entities a populate pass inserts
    pub fn entity_count(&self) -> usize {
        let fish: usize = self
            .fish_schools
            .iter()
            .map(|school| school.count * if school.fins { 1 + FIN_OFFSETS.len() } else { 1 })
            .sum();
        let fish1: usize = self.fish1_schools.iter().map(|school| school.count).sum();
        let rocks: usize = self.rocks.iter().map(|group| group.count).sum();
        let jellyfish: usize = self.jellyfish.iter().map(|group| group.count).sum();

        usize::from(self.skybox)
            + usize::from(self.ground)
            + usize::from(self.water_surface)
            + fish
            + fish1
            + self.seaweed.count
            + rocks
            + jellyfish
            + usize::from(self.bubbles.is_some())
    }
}

/// Builds the reef from a [`PopulationConfig`]
///
/// Insertion order matters: the skybox and seabed draw first in the opaque
/// pass, and every fin follows its fish.
#[derive(Debug, Clone, Default)]
pub struct UnderwaterPopulator {
    config: PopulationConfig,
}

impl UnderwaterPopulator {
    /// Create a populator
    pub fn new(config: PopulationConfig) -> Self {
        Self { config }
    }

    /// The population layout
    pub fn config(&self) -> &PopulationConfig {
        &self.config
    }

    fn add_scenery(&self, scene: &mut Scene) -> Result<(), SceneError> {
        if self.config.skybox {
            let visual = assets::SKYBOX.load(scene.resources_mut())?;
            scene.add(Box::new(Skybox::new(visual)));
        }
        if self.config.ground {
            let visual = assets::GROUND.load(scene.resources_mut())?;
            scene.add(Box::new(Ground::new(visual)));
        }
        if self.config.water_surface {
            let visual = assets::WATER_SURFACE.load(scene.resources_mut())?;
            let height = scene.config().environment.fog.surface_height;
            scene.add(Box::new(WaterSurface::new(height, visual)));
        }
        Ok(())
    }

    fn add_fish(&self, scene: &mut Scene) -> Result<(), SceneError> {
        let visual = assets::FISH.load(scene.resources_mut())?;
        let fin_visual = assets::FIN.load(scene.resources_mut())?;

        for school in &self.config.fish_schools {
            for _ in 0..school.count {
                let rng = scene.rng_mut();
                let position = school.center + random::box_offset(rng, school.spread);
                let scale = random::range(rng, school.scale.0, school.scale.1);
                let speed = random::range(rng, school.speed.0, school.speed.1);
                let fish = Fish::new(rng, position, visual)
                    .with_school(school.center)
                    .with_scale(scale)
                    .with_speed(speed);
                let fish = scene.add(Box::new(fish));

                if school.fins {
                    for offset in FIN_OFFSETS {
                        let rng = scene.rng_mut();
                        let flap = random::range(rng, 10.0, 14.0);
                        let fin = FishFin::new(rng, fish, offset, fin_visual).with_flap_speed(flap);
                        scene.add(Box::new(fin));
                    }
                }
            }
        }

        let visual = assets::FISH1.load(scene.resources_mut())?;
        for school in &self.config.fish1_schools {
            for _ in 0..school.count {
                let rng = scene.rng_mut();
                let position = school.center + random::box_offset(rng, school.spread);
                let scale = random::range(rng, school.scale.0, school.scale.1);
                let speed = random::range(rng, school.speed.0, school.speed.1);
                let fish = Fish1::new(rng, position, visual)
                    .with_school(school.center)
                    .with_scale(scale)
                    .with_speed(speed);
                scene.add(Box::new(fish));
            }
        }
        Ok(())
    }

    fn add_seabed(&self, scene: &mut Scene) -> Result<(), SceneError> {
        let field = &self.config.seaweed;
        let visual = assets::SEAWEED.load(scene.resources_mut())?;
        for _ in 0..field.count {
            let rng = scene.rng_mut();
            let x = random::centered(rng, field.extent);
            let z = random::centered(rng, field.extent);
            let height = random::range(rng, field.height.0, field.height.1);
            let weed = Seaweed::new(rng, Vec3::new(x, SEABED_HEIGHT, z), height, visual);
            scene.add(Box::new(weed));
        }

        let visual = assets::ROCK.load(scene.resources_mut())?;
        for group in &self.config.rocks {
            for _ in 0..group.count {
                let rng = scene.rng_mut();
                let x = group.center.x + random::centered(rng, group.spread.x);
                let z = group.center.z + random::centered(rng, group.spread.z);
                let size = random::range(rng, group.size.0, group.size.1);
                let position = Vec3::new(x, group.base_height + size * group.lift, z);
                let rock = Rock::new(rng, position, size, group.flatten, visual);
                scene.add(Box::new(rock));
            }
        }
        Ok(())
    }

    fn add_jellyfish(&self, scene: &mut Scene) -> Result<(), SceneError> {
        let visual = assets::JELLYFISH.load(scene.resources_mut())?;
        for group in &self.config.jellyfish {
            for _ in 0..group.count {
                let rng = scene.rng_mut();
                let position = group.center + random::box_offset(rng, group.spread);
                let size = random::range(rng, group.size.0, group.size.1);
                let jelly = Jellyfish::new(rng, position, visual)
                    .with_size(size)
                    .with_transparency(group.transparency);
                scene.add(Box::new(jelly));
            }
        }
        Ok(())
    }

    fn add_bubbles(&self, scene: &mut Scene) -> Result<(), SceneError> {
        if let Some(source) = &self.config.bubbles {
            let visual = assets::BUBBLE.load(scene.resources_mut())?;
            let generator = BubbleFactory::new(visual).generator(source.position, source.spawner.clone());
            scene.add(Box::new(generator));
        }
        Ok(())
    }
}

impl ScenePopulator for UnderwaterPopulator {
    fn populate(&mut self, scene: &mut Scene) -> Result<(), SceneError> {
        self.config
            .validate()
            .map_err(|e| SceneError::Population(e.to_string()))?;

        self.add_scenery(scene)?;
        self.add_fish(scene)?;
        self.add_seabed(scene)?;
        self.add_jellyfish(scene)?;
        self.add_bubbles(scene)?;

        let cached = scene.resources_mut().len();
        log::debug!("Reef populated: {} resources cached, {} entities", cached, scene.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reef_engine::config::SceneConfig;
    use reef_engine::render::HeadlessProvider;

    fn scene() -> Scene {
        Scene::new(SceneConfig::default(), Box::new(HeadlessProvider::new()))
    }

    #[test]
    fn test_default_population_counts() {
        let config = PopulationConfig::default();
        assert_eq!(config.entity_count(), 159);

        let mut scene = scene();
        scene
            .populate(&mut UnderwaterPopulator::new(config))
            .expect("populate");
        assert_eq!(scene.len(), 159);

        let count = |name: &str| scene.entities().filter(|(_, e)| e.name() == name).count();
        assert_eq!(count("fish"), 21);
        assert_eq!(count("fin"), 16);
        assert_eq!(count("fish1"), 11);
        assert_eq!(count("seaweed"), 50);
        assert_eq!(count("rock"), 44);
        assert_eq!(count("jellyfish"), 13);
        assert_eq!(count("spawner"), 1);
    }

    #[test]
    fn test_scenery_comes_first() {
        let mut scene = scene();
        scene
            .populate(&mut UnderwaterPopulator::default())
            .expect("populate");

        let names: Vec<&str> = scene.entities().take(4).map(|(_, e)| e.name()).collect();
        assert_eq!(names, vec!["skybox", "ground", "water surface", "fish"]);
    }

    #[test]
    fn test_every_fin_has_a_fish_parent() {
        let mut scene = scene();
        scene
            .populate(&mut UnderwaterPopulator::default())
            .expect("populate");

        for (_, entity) in scene.entities().filter(|(_, e)| e.name() == "fin") {
            let parent = entity.node().parent.expect("fin parent");
            assert_eq!(scene.get(parent).expect("fish").name(), "fish");
        }
    }

    #[test]
    fn test_assets_requested_once_each() {
        let mut scene = scene();
        scene
            .populate(&mut UnderwaterPopulator::default())
            .expect("populate");

        // Fins share the fish mesh and texture, water shares the ground quad:
        // 8 meshes, 7 textures, 3 shaders
        assert_eq!(scene.resources_mut().provider_loads(), 18);
        assert_eq!(scene.resources_mut().len(), 18);
    }

    #[test]
    fn test_reset_rebuilds_same_reef() {
        let mut scene = scene();
        let mut populator = UnderwaterPopulator::default();
        scene.populate(&mut populator).expect("populate");
        let first: Vec<Vec3> = scene.entities().map(|(_, e)| e.node().transform.position).collect();

        for _ in 0..120 {
            scene.update(1.0 / 60.0);
        }
        scene.reset(&mut populator).expect("reset");
        let second: Vec<Vec3> = scene.entities().map(|(_, e)| e.node().transform.position).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_asset_fails_population() {
        let mut scene = Scene::new(
            SceneConfig::default(),
            Box::new(HeadlessProvider::new().with_missing(assets::JELLYFISH.mesh)),
        );
        let result = scene.populate(&mut UnderwaterPopulator::default());
        assert!(matches!(result, Err(SceneError::Resource(_))));
    }

    #[test]
    fn test_invalid_layout_is_rejected() {
        let mut config = PopulationConfig::default();
        config.jellyfish[0].size = (2.0, 1.0);
        assert!(config.validate().is_err());

        let mut scene = scene();
        let result = scene.populate(&mut UnderwaterPopulator::new(config));
        assert!(matches!(result, Err(SceneError::Population(_))));
    }

    #[test]
    fn test_layout_round_trips_through_ron() {
        let path = std::env::temp_dir().join("underwater_population_test.ron");
        let path = path.to_str().expect("utf-8 temp path");
        let mut config = PopulationConfig::default();
        config.seaweed.count = 3;
        config.bubbles = None;

        config.save_to_file(path).expect("save");
        let loaded = PopulationConfig::load_from_file(path).expect("load");
        assert_eq!(loaded, config);
        let _ = std::fs::remove_file(path);
    }
}
