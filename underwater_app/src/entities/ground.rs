//! Sandy seabed plane

use reef_engine::foundation::math::{Transform, Vec3};
use reef_engine::render::{DrawCommand, RenderContext, RenderError, RenderState, VisualResources};
use reef_engine::scene::{Entity, Node, UpdateContext};

/// Height of the seabed
pub const SEABED_HEIGHT: f32 = -15.0;

/// The seabed, a scaled quad drawn from both sides
pub struct Ground {
    node: Node,
    resources: VisualResources,
}

impl Ground {
    /// Create the seabed
    pub fn new(resources: VisualResources) -> Self {
        let mut transform = Transform::from_position(Vec3::new(0.0, SEABED_HEIGHT, 0.0));
        transform.scale = Vec3::new(5.0, 1.0, 5.0);
        Self {
            node: Node::new(transform),
            resources,
        }
    }
}

impl Entity for Ground {
    fn update(&mut self, _ctx: &mut UpdateContext<'_>, _dt: f32) -> bool {
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
        "ground"
    }
}
