//! Flapping fin attached to a fish

use reef_engine::behavior::PhaseOscillator;
use reef_engine::foundation::collections::EntityId;
use reef_engine::foundation::math::{Transform, Vec3};
use reef_engine::foundation::random::{self, StdRng};
use reef_engine::render::{DrawCommand, RenderContext, RenderError, VisualResources};
use reef_engine::scene::{Entity, Node, UpdateContext};

const AMPLITUDE: f32 = 0.3;

/// A fin in its parent fish's space
///
/// The local offset is fixed; only the flap rotation changes. The world
/// matrix composes onto the fish's current-frame matrix, and the fin is
/// removed together with its fish.
pub struct FishFin {
    node: Node,
    resources: VisualResources,
    flap: PhaseOscillator,
}

impl FishFin {
    /// Create a fin of `fish` at `offset` with a random flap phase
    pub fn new(rng: &mut StdRng, fish: EntityId, offset: Vec3, resources: VisualResources) -> Self {
        let mut transform = Transform::from_position(offset);
        transform.scale = Vec3::new(0.15, 0.08, 0.15);
        Self {
            node: Node::new(transform).with_parent(fish),
            resources,
            flap: PhaseOscillator::new(random::phase(rng), 8.0),
        }
    }

    /// Builder pattern: set flap frequency in radians per second
    pub fn with_flap_speed(mut self, speed: f32) -> Self {
        self.flap.frequency = speed;
        self
    }
}

impl Entity for FishFin {
    fn update(&mut self, _ctx: &mut UpdateContext<'_>, dt: f32) -> bool {
        self.flap.advance(dt);
        self.node.transform.rotation = Vec3::new(
            self.flap.cos_harmonic(0.5) * AMPLITUDE * 0.3,
            0.0,
            self.flap.sin() * AMPLITUDE,
        );
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
        "fin"
    }
}
