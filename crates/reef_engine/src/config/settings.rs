//! # Scene Configuration
//!
//! Serializable settings for the camera, the time-driven environment and the
//! bounded spawners. Defaults reproduce the underwater scene's tuning.

use super::{Config, ConfigError};
use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Perspective camera parameters, fixed at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// World up vector
    pub up: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            aspect: 1280.0 / 720.0,
            near: 0.1,
            far: 500.0,
            up: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

impl CameraConfig {
    /// Validate projection parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera fov must be in (0, 180) degrees, got {}",
                self.fov_degrees
            )));
        }
        if self.aspect <= 0.0 {
            return Err(ConfigError::Invalid(format!("camera aspect must be positive, got {}", self.aspect)));
        }
        if self.near <= 0.0 || self.far <= self.near {
            return Err(ConfigError::Invalid(format!(
                "camera clip planes must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        if self.up.norm_squared() == 0.0 {
            return Err(ConfigError::Invalid("camera up vector must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Depth-dependent fog regimes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    /// Height of the water surface; above it the sky regime applies
    pub surface_height: f32,
    /// Fog color above the surface
    pub above_color: Vec3,
    /// Fog density above the surface
    pub above_density: f32,
    /// Fog color just below the surface
    pub shallow_color: Vec3,
    /// Fog color at and beyond `full_color_depth`
    pub deep_color: Vec3,
    /// Density just below the surface
    pub base_density: f32,
    /// Density added per unit of depth
    pub density_per_depth: f32,
    /// Upper bound on underwater density
    pub max_density: f32,
    /// Depth at which the deep color is fully reached
    pub full_color_depth: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            surface_height: 0.0,
            above_color: Vec3::new(0.4, 0.6, 0.85),
            above_density: 0.0005,
            shallow_color: Vec3::new(0.0, 0.3, 0.5),
            deep_color: Vec3::new(0.0, 0.1, 0.25),
            base_density: 0.004,
            density_per_depth: 0.0005,
            max_density: 0.015,
            full_color_depth: 15.0,
        }
    }
}

/// Oscillation parameters for the scene lights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightAnimationConfig {
    /// Direction towards the sun
    pub sun_direction: Vec3,
    /// Sun color
    pub sun_color: Vec3,

    /// Horizontal orbit radius of the point light
    pub point_orbit_radius: f32,
    /// Angular speeds of the orbit on X and Z
    pub point_orbit_speed: (f32, f32),
    /// Resting height of the point light
    pub point_base_height: f32,
    /// Vertical bob amplitude and angular speed
    pub point_bob: (f32, f32),
    /// Base point light color; the green channel is animated
    pub point_color: Vec3,
    /// Green channel centre, amplitude and angular speed
    pub point_green_shift: (f32, f32, f32),
    /// Intensity centre, amplitude and angular speed
    pub point_pulse: (f32, f32, f32),

    /// Spotlight offset from the camera position
    pub spot_offset: Vec3,
    /// Spotlight color
    pub spot_color: Vec3,
    /// Cosine of the spotlight cutoff angle
    pub spot_cutoff: f32,
    /// Intensity centre, amplitude and angular speed
    pub spot_flicker: (f32, f32, f32),
}

impl Default for LightAnimationConfig {
    fn default() -> Self {
        Self {
            sun_direction: Vec3::new(0.3, 0.9, 0.2),
            sun_color: Vec3::new(1.0, 0.95, 0.85),
            point_orbit_radius: 15.0,
            point_orbit_speed: (0.5, 0.3),
            point_base_height: -8.0,
            point_bob: (2.0, 0.7),
            point_color: Vec3::new(0.2, 0.8, 1.0),
            point_green_shift: (0.7, 0.3, 0.8),
            point_pulse: (12.0, 5.0, 2.0),
            spot_offset: Vec3::new(0.5, -0.3, 0.0),
            spot_color: Vec3::new(1.0, 1.0, 0.9),
            spot_cutoff: 0.85,
            spot_flicker: (18.0, 2.0, 10.0),
        }
    }
}

/// Environment settings: fog and light animation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Fog regimes
    pub fog: FogConfig,
    /// Light oscillation
    pub lights: LightAnimationConfig,
}

impl EnvironmentConfig {
    /// Validate fog bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fog = &self.fog;
        if fog.above_density < 0.0 || fog.base_density < 0.0 || fog.density_per_depth < 0.0 {
            return Err(ConfigError::Invalid("fog densities must be non-negative".to_string()));
        }
        if fog.max_density < fog.base_density {
            return Err(ConfigError::Invalid(format!(
                "fog max_density ({}) is below base_density ({})",
                fog.max_density, fog.base_density
            )));
        }
        if fog.full_color_depth <= 0.0 {
            return Err(ConfigError::Invalid("fog full_color_depth must be positive".to_string()));
        }
        Ok(())
    }
}

/// Bounded random spawner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Seconds between batches
    pub interval: f32,
    /// Entities created per batch
    pub batch_size: usize,
    /// Horizontal radius around the spawner
    pub radius: f32,
    /// Lifetime range in seconds
    pub lifetime: (f32, f32),
    /// Size range
    pub size: (f32, f32),
    /// Upper bound on simultaneously alive spawned entities
    pub max_alive: Option<usize>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            interval: 0.05,
            batch_size: 3,
            radius: 30.0,
            lifetime: (8.0, 14.0),
            size: (0.05, 0.2),
            max_alive: Some(5000),
        }
    }
}

impl SpawnerConfig {
    /// Validate timing and ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval <= 0.0 {
            return Err(ConfigError::Invalid(format!("spawn interval must be positive, got {}", self.interval)));
        }
        if self.radius < 0.0 {
            return Err(ConfigError::Invalid(format!("spawn radius must be non-negative, got {}", self.radius)));
        }
        if self.lifetime.0 > self.lifetime.1 || self.size.0 > self.size.1 {
            return Err(ConfigError::Invalid("spawn ranges must be ordered (min, max)".to_string()));
        }
        Ok(())
    }
}

/// Top-level scene configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for all procedural randomness
    pub seed: u64,
    /// Step used by fixed-step drivers
    pub fixed_timestep: f32,
    /// Frames to run in headless mode
    pub frame_count: u32,
    /// Camera projection
    pub camera: CameraConfig,
    /// Environment animation
    pub environment: EnvironmentConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EA_F10E,
            fixed_timestep: 1.0 / 60.0,
            frame_count: 600,
            camera: CameraConfig::default(),
            environment: EnvironmentConfig::default(),
        }
    }
}

impl Config for SceneConfig {}

impl SceneConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;
        self.environment.validate()?;
        if self.fixed_timestep < 0.0 {
            return Err(ConfigError::Invalid("fixed_timestep must be non-negative".to_string()));
        }
        Ok(())
    }
}
