//! Rising, wobbling air bubble

use reef_engine::behavior::{Lifetime, PhaseOscillator, SpawnParams};
use reef_engine::foundation::math::{Transform, Vec3};
use reef_engine::foundation::random::{self, StdRng};
use reef_engine::render::{DrawCommand, RenderContext, RenderError, RenderState, VisualResources};
use reef_engine::scene::{Entity, Node, UpdateContext};

/// Bubbles pop once they rise above this height
pub const SURFACE_POP_HEIGHT: f32 = 5.0;

const WOBBLE_AMPLITUDE: f32 = 0.3;
const GROWTH_PER_SECOND: f32 = 0.02;
const OPACITY: f32 = 0.6;
const FADE_TAIL: f32 = 0.2;

/// A translucent bubble
pub struct Bubble {
    node: Node,
    resources: VisualResources,
    lifetime: Lifetime,
    wobble: PhaseOscillator,
    rise_speed: f32,
    size: f32,
}

impl Bubble {
    /// Create a bubble from spawner output
    pub fn new(rng: &mut StdRng, params: SpawnParams, resources: VisualResources) -> Self {
        Self {
            node: Node::new(Transform::from_position(params.position).with_uniform_scale(params.size)).translucent(),
            resources,
            lifetime: Lifetime::new(params.lifetime),
            wobble: PhaseOscillator::random(rng, 2.0, 6.0),
            rise_speed: random::range(rng, 1.5, 3.5),
            size: params.size,
        }
    }

    /// Opacity after fading over the last part of life
    pub fn alpha(&self) -> f32 {
        OPACITY * self.lifetime.fade_out(FADE_TAIL)
    }

    /// Age and duration
    pub fn lifetime(&self) -> &Lifetime {
        &self.lifetime
    }
}

impl Entity for Bubble {
    fn update(&mut self, _ctx: &mut UpdateContext<'_>, dt: f32) -> bool {
        self.lifetime.tick(dt);
        if self.lifetime.is_expired() || self.node.transform.position.y > SURFACE_POP_HEIGHT {
            return false;
        }

        self.wobble.advance(dt);
        let velocity = Vec3::new(
            self.wobble.sin() * WOBBLE_AMPLITUDE,
            self.rise_speed,
            self.wobble.cos_harmonic(0.7) * WOBBLE_AMPLITUDE * 0.5,
        );
        self.node.transform.position += velocity * dt;

        // Grows slowly as the pressure drops
        let scale = self.size * (1.0 + self.lifetime.age * GROWTH_PER_SECOND);
        self.node.transform.scale = Vec3::new(scale, scale, scale);
        true
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let command = DrawCommand::new(&self.resources, *self.node.world_matrix()).with_alpha(self.alpha());
        ctx.with_state(RenderState::BLENDED, |ctx| ctx.draw(&command))
    }

    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn name(&self) -> &'static str {
        "bubble"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support::{scene, visual};
    use approx::assert_relative_eq;
    use reef_engine::foundation::random::seeded;

    fn params(y: f32, lifetime: f32) -> SpawnParams {
        SpawnParams {
            position: Vec3::new(0.0, y, 0.0),
            lifetime,
            size: 0.1,
        }
    }

    #[test]
    fn test_expires_after_lifetime() {
        let mut scene = scene();
        let mut rng = seeded(41);
        let id = scene.add(Box::new(Bubble::new(&mut rng, params(-100.0, 2.0), visual(1))));

        for _ in 0..8 {
            scene.update(0.25);
        }
        assert!(scene.contains(id));
        scene.update(0.25);
        assert!(!scene.contains(id));
    }

    #[test]
    fn test_pops_above_surface() {
        let mut scene = scene();
        let mut rng = seeded(42);
        let id = scene.add(Box::new(Bubble::new(&mut rng, params(SURFACE_POP_HEIGHT - 0.1, 100.0), visual(1))));

        // First frame rises past the surface, the next one pops
        scene.update(0.5);
        assert!(scene.contains(id));
        scene.update(0.5);
        assert!(!scene.contains(id));
    }

    #[test]
    fn test_fades_over_last_fifth() {
        let mut rng = seeded(43);
        let mut bubble = Bubble::new(&mut rng, params(-9.0, 10.0), visual(1));
        assert_relative_eq!(bubble.alpha(), OPACITY);

        bubble.lifetime.age = 8.0;
        assert_relative_eq!(bubble.alpha(), OPACITY, epsilon = 1e-5);

        bubble.lifetime.age = 9.0;
        assert_relative_eq!(bubble.alpha(), OPACITY * 0.5, epsilon = 1e-5);

        bubble.lifetime.age = 10.0;
        assert_relative_eq!(bubble.alpha(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_rises_and_grows() {
        let mut scene = scene();
        let mut rng = seeded(44);
        let id = scene.add(Box::new(Bubble::new(&mut rng, params(-9.0, 10.0), visual(1))));

        scene.update(1.0);
        let node = scene.get(id).expect("bubble").node();
        let rise = node.transform.position.y + 9.0;
        assert!((1.5..3.5).contains(&rise), "rise = {}", rise);
        assert_relative_eq!(node.transform.scale.x, 0.1 * 1.02, epsilon = 1e-6);
    }

    #[test]
    fn test_draws_blended_with_alpha() {
        let mut scene = scene();
        let mut rng = seeded(45);
        scene.add(Box::new(Bubble::new(&mut rng, params(-9.0, 10.0), visual(1))));

        let mut backend = reef_engine::render::RecordingBackend::new();
        scene.render(&mut backend);
        let draw = &backend.draws()[0];
        assert_eq!(draw.state, RenderState::BLENDED);
        assert_relative_eq!(draw.command.color.w, OPACITY);
    }
}
