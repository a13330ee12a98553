//! Static seabed rock

use reef_engine::foundation::math::{Transform, Vec3};
use reef_engine::foundation::random::{self, StdRng};
use reef_engine::render::{DrawCommand, RenderContext, RenderError, VisualResources};
use reef_engine::scene::{Entity, Node, UpdateContext};

/// A rock with a random heading
pub struct Rock {
    node: Node,
    resources: VisualResources,
}

impl Rock {
    /// Create a rock at `position`, `size` wide and `size * flatten` tall
    pub fn new(rng: &mut StdRng, position: Vec3, size: f32, flatten: f32, resources: VisualResources) -> Self {
        let mut transform = Transform::from_position(position);
        transform.scale = Vec3::new(size, size * flatten, size);
        transform.rotation.y = random::phase(rng);
        Self {
            node: Node::new(transform),
            resources,
        }
    }
}

impl Entity for Rock {
    fn update(&mut self, _ctx: &mut UpdateContext<'_>, _dt: f32) -> bool {
        true
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        ctx.draw(&DrawCommand::new(&self.resources, *self.node.world_matrix()))
    }

    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn name(&self) -> &'static str {
        "rock"
    }
}
