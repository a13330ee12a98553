//! Background cube

use reef_engine::foundation::math::{Mat4, Transform};
use reef_engine::render::{DrawCommand, RenderContext, RenderError, RenderState, VisualResources};
use reef_engine::scene::{Entity, Node, UpdateContext};

/// Always-present background
///
/// The skybox shader strips the view translation, so the model matrix stays
/// identity and the node never moves. Drawn first with culling off, since
/// the camera sits inside the cube.
pub struct Skybox {
    node: Node,
    resources: VisualResources,
}

impl Skybox {
    /// Create the skybox
    pub fn new(resources: VisualResources) -> Self {
        Self {
            node: Node::new(Transform::identity()),
            resources,
        }
    }
}

impl Entity for Skybox {
    fn update(&mut self, _ctx: &mut UpdateContext<'_>, _dt: f32) -> bool {
        true
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let command = DrawCommand::new(&self.resources, Mat4::identity());
        ctx.with_state(RenderState::TWO_SIDED, |ctx| ctx.draw(&command))
    }

    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn name(&self) -> &'static str {
        "skybox"
    }
}
