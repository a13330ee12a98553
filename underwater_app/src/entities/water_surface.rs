//! Translucent water surface

use reef_engine::foundation::math::{Transform, Vec3};
use reef_engine::render::{DrawCommand, RenderContext, RenderError, RenderState, VisualResources};
use reef_engine::scene::{Entity, Node, UpdateContext};

const OPACITY: f32 = 0.85;
const WATER_COLOR: (f32, f32, f32) = (0.0, 0.4, 0.6);

/// A large quad at the surface height that stays centred under the camera
///
/// Wave displacement happens in the water shader from the frame time, so
/// only the horizontal position changes here.
pub struct WaterSurface {
    node: Node,
    resources: VisualResources,
    wave_height: f32,
    wave_frequency: f32,
}

impl WaterSurface {
    /// Create the surface at `height`
    pub fn new(height: f32, resources: VisualResources) -> Self {
        let mut transform = Transform::from_position(Vec3::new(0.0, height, 0.0));
        transform.scale = Vec3::new(500.0, 1.0, 500.0);
        Self {
            node: Node::new(transform).translucent(),
            resources,
            wave_height: 0.3,
            wave_frequency: 0.15,
        }
    }

    /// Builder pattern: set wave shape
    pub fn with_waves(mut self, height: f32, frequency: f32) -> Self {
        self.wave_height = height;
        self.wave_frequency = frequency;
        self
    }

    /// Wave height and frequency passed to the water shader
    pub fn waves(&self) -> (f32, f32) {
        (self.wave_height, self.wave_frequency)
    }
}

impl Entity for WaterSurface {
    fn update(&mut self, ctx: &mut UpdateContext<'_>, _dt: f32) -> bool {
        let camera = ctx.camera().position;
        let position = &mut self.node.transform.position;
        position.x = camera.x;
        position.z = camera.z;
        true
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let (r, g, b) = WATER_COLOR;
        let command = DrawCommand::new(&self.resources, *self.node.world_matrix())
            .with_rgb(Vec3::new(r, g, b))
            .with_alpha(OPACITY);
        ctx.with_state(RenderState::BLENDED, |ctx| ctx.draw(&command))
    }

    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn name(&self) -> &'static str {
        "water surface"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support::{scene, visual};

    #[test]
    fn test_follows_camera_horizontally() {
        let mut scene = scene();
        let id = scene.add(Box::new(WaterSurface::new(0.0, visual(1))));
        scene
            .camera_mut()
            .set_pose(Vec3::new(12.0, -9.0, -30.0), Vec3::new(0.0, -12.0, 0.0));

        scene.update(0.0);
        let position = scene.get(id).expect("surface").node().transform.position;
        assert_eq!(position, Vec3::new(12.0, 0.0, -30.0));
    }
}
