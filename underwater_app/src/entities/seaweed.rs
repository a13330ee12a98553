//! Swaying seaweed strand

use reef_engine::behavior::PhaseOscillator;
use reef_engine::foundation::math::{Transform, Vec3};
use reef_engine::foundation::random::StdRng;
use reef_engine::render::{DrawCommand, RenderContext, RenderError, RenderState, VisualResources};
use reef_engine::scene::{Entity, Node, UpdateContext};

const SWAY_AMPLITUDE: f32 = 0.05;

/// Seaweed rooted in the seabed
///
/// Leaves are thin, so it draws with culling off.
pub struct Seaweed {
    node: Node,
    resources: VisualResources,
    sway: PhaseOscillator,
}

impl Seaweed {
    /// Create a strand at `position` with the given height
    pub fn new(rng: &mut StdRng, position: Vec3, height: f32, resources: VisualResources) -> Self {
        let mut transform = Transform::from_position(position);
        transform.scale = Vec3::new(height * 0.7, height, height * 0.7);
        Self {
            node: Node::new(transform),
            resources,
            sway: PhaseOscillator::random(rng, 0.3, 0.6),
        }
    }
}

impl Entity for Seaweed {
    fn update(&mut self, _ctx: &mut UpdateContext<'_>, dt: f32) -> bool {
        self.sway.advance(dt);
        let rotation = &mut self.node.transform.rotation;
        rotation.x = self.sway.sin() * SWAY_AMPLITUDE;
        rotation.z = (self.sway.phase * 0.7 + 1.0).sin() * SWAY_AMPLITUDE * 0.5;
        true
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let command = DrawCommand::new(&self.resources, *self.node.world_matrix());
        ctx.with_state(RenderState::TWO_SIDED, |ctx| ctx.draw(&command))
    }

    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn name(&self) -> &'static str {
        "seaweed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support::{scene, visual};
    use reef_engine::foundation::random::seeded;

    #[test]
    fn test_sway_is_gentle_and_rooted() {
        let mut scene = scene();
        let mut rng = seeded(51);
        let root = Vec3::new(3.0, -15.0, -4.0);
        let id = scene.add(Box::new(Seaweed::new(&mut rng, root, 0.2, visual(1))));

        for _ in 0..600 {
            scene.update(1.0 / 60.0);
            let transform = scene.get(id).expect("seaweed").node().transform;
            assert!(transform.rotation.x.abs() <= SWAY_AMPLITUDE);
            assert!(transform.rotation.z.abs() <= SWAY_AMPLITUDE * 0.5);
            assert_eq!(transform.position, root);
        }
    }
}
