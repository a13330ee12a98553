//! # Lighting and Fog Environment
//!
//! The scene's three lights and its fog are pure functions of global time and
//! the camera pose. [`Environment::update`] recomputes all of them every frame;
//! entities only ever read the result.

use crate::config::{EnvironmentConfig, FogConfig, LightAnimationConfig};
use crate::foundation::math::{utils, Vec3};

/// Directional light such as the sun
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Normalized direction towards the light
    pub direction: Vec3,
    /// Light color
    pub color: Vec3,
}

impl DirectionalLight {
    /// Create a directional light; the direction is normalized
    pub fn new(direction: Vec3, color: Vec3) -> Self {
        Self {
            direction: direction.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::y),
            color,
        }
    }
}

/// Omnidirectional point light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// World position
    pub position: Vec3,
    /// Light color
    pub color: Vec3,
    /// Intensity multiplier
    pub intensity: f32,
}

/// Cone light attached to the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    /// World position
    pub position: Vec3,
    /// Normalized direction of the cone axis
    pub direction: Vec3,
    /// Light color
    pub color: Vec3,
    /// Cosine of the cone's half angle
    pub cutoff: f32,
    /// Intensity multiplier
    pub intensity: f32,
}

/// Exponential fog parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    /// Fog color
    pub color: Vec3,
    /// Fog density
    pub density: f32,
}

impl Fog {
    /// Fog for a viewer at `height`
    ///
    /// Above the surface a thin sky-colored haze applies. Below it the
    /// density grows linearly with depth up to a cap, and the color blends
    /// from shallow to deep over `full_color_depth`.
    pub fn at_height(config: &FogConfig, height: f32) -> Self {
        if height > config.surface_height {
            return Self {
                color: config.above_color,
                density: config.above_density,
            };
        }

        let depth = config.surface_height - height;
        let density = (config.base_density + depth * config.density_per_depth).min(config.max_density);
        let fraction = if config.full_color_depth > 0.0 {
            utils::clamp(depth / config.full_color_depth, 0.0, 1.0)
        } else {
            1.0
        };

        Self {
            color: config.shallow_color.lerp(&config.deep_color, fraction),
            density,
        }
    }
}

/// Time-driven light and fog state shared with every entity
#[derive(Debug, Clone)]
pub struct Environment {
    config: EnvironmentConfig,
    /// Sun
    pub sun: DirectionalLight,
    /// Orbiting point light
    pub point: PointLight,
    /// Camera-mounted spotlight
    pub spot: SpotLight,
    /// Depth-dependent fog
    pub fog: Fog,
}

impl Environment {
    /// Create an environment evaluated at time zero with the camera at the origin
    pub fn new(config: EnvironmentConfig) -> Self {
        let mut environment = Self {
            sun: DirectionalLight::new(config.lights.sun_direction, config.lights.sun_color),
            point: PointLight {
                position: Vec3::zeros(),
                color: config.lights.point_color,
                intensity: 0.0,
            },
            spot: SpotLight {
                position: Vec3::zeros(),
                direction: Vec3::new(0.0, 0.0, -1.0),
                color: config.lights.spot_color,
                cutoff: config.lights.spot_cutoff,
                intensity: 0.0,
            },
            fog: Fog::at_height(&config.fog, 0.0),
            config,
        };
        environment.update(0.0, Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
        environment
    }

    /// Settings driving this environment
    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    /// Recompute lights and fog from global time and the camera pose
    pub fn update(&mut self, time: f32, camera_position: Vec3, camera_target: Vec3) {
        let lights = &self.config.lights;

        self.sun = DirectionalLight::new(lights.sun_direction, lights.sun_color);
        self.point = animate_point_light(lights, time);
        self.spot = animate_spot_light(lights, time, camera_position, camera_target, self.spot.direction);
        self.fog = Fog::at_height(&self.config.fog, camera_position.y);
    }
}

fn animate_point_light(lights: &LightAnimationConfig, time: f32) -> PointLight {
    let (speed_x, speed_z) = lights.point_orbit_speed;
    let (bob_amplitude, bob_speed) = lights.point_bob;
    let (green_center, green_amplitude, green_speed) = lights.point_green_shift;
    let (pulse_center, pulse_amplitude, pulse_speed) = lights.point_pulse;

    let position = Vec3::new(
        (time * speed_x).sin() * lights.point_orbit_radius,
        lights.point_base_height + (time * bob_speed).sin() * bob_amplitude,
        (time * speed_z).cos() * lights.point_orbit_radius,
    );

    let mut color = lights.point_color;
    color.y = green_center + (time * green_speed).sin() * green_amplitude;

    PointLight {
        position,
        color,
        intensity: pulse_center + (time * pulse_speed).sin() * pulse_amplitude,
    }
}

fn animate_spot_light(
    lights: &LightAnimationConfig,
    time: f32,
    camera_position: Vec3,
    camera_target: Vec3,
    previous_direction: Vec3,
) -> SpotLight {
    let (flicker_center, flicker_amplitude, flicker_speed) = lights.spot_flicker;
    let position = camera_position + lights.spot_offset;

    SpotLight {
        position,
        direction: (camera_target - position)
            .try_normalize(f32::EPSILON)
            .unwrap_or(previous_direction),
        color: lights.spot_color,
        cutoff: lights.spot_cutoff,
        intensity: flicker_center + (time * flicker_speed).sin() * flicker_amplitude,
    }
}
