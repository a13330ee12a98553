//! Pulsing, drifting jellyfish

use reef_engine::behavior::PhaseOscillator;
use reef_engine::foundation::math::{constants::HALF_PI, Transform, Vec3};
use reef_engine::foundation::random::{self, StdRng};
use reef_engine::render::{DrawCommand, RenderContext, RenderError, RenderState, VisualResources};
use reef_engine::scene::{Entity, Node, UpdateContext};

/// Vertical band the bell stays inside
pub const DEPTH_RANGE: (f32, f32) = (-9.0, 8.0);

/// Horizontal half-extent on X and Z
pub const HORIZONTAL_BOUND: f32 = 70.0;

const PULSE_AMPLITUDE: f32 = 0.35;
const PROPULSION: f32 = 4.0;
const SINK_RATE: f32 = 1.2;
const DRAG: f32 = 0.92;
const VELOCITY_RANGE: (f32, f32) = (-2.0, 3.0);

/// A translucent jellyfish
///
/// The bell widens and flattens with the pulse. Contraction pushes it up,
/// it sinks in between, and water drag damps the vertical speed. A slow
/// current carries it sideways and reverses at the horizontal bounds.
pub struct Jellyfish {
    node: Node,
    resources: VisualResources,
    pulse: PhaseOscillator,
    base_scale: f32,
    vertical_velocity: f32,
    drift: Vec3,
    transparency: f32,
}

impl Jellyfish {
    /// Create a jellyfish at `position` with random pulse and drift
    pub fn new(rng: &mut StdRng, position: Vec3, resources: VisualResources) -> Self {
        let pulse = PhaseOscillator::random(rng, 1.2, 1.8);
        let drift = Vec3::new(random::centered(rng, 0.3), 0.0, random::centered(rng, 0.3));
        let base_scale = 1.5;
        Self {
            node: Node::new(Transform::from_position(position).with_uniform_scale(base_scale)).translucent(),
            resources,
            pulse,
            base_scale,
            vertical_velocity: 0.0,
            drift,
            transparency: 0.75,
        }
    }

    /// Builder pattern: set the bell size the pulse scales around
    pub fn with_size(mut self, size: f32) -> Self {
        self.base_scale = size;
        self.node.transform.scale = Vec3::new(size, size, size);
        self
    }

    /// Builder pattern: set opacity
    pub fn with_transparency(mut self, transparency: f32) -> Self {
        self.transparency = transparency.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: drift along the horizontal part of `direction`
    pub fn with_drift(mut self, direction: Vec3) -> Self {
        self.drift = Vec3::new(direction.x, 0.0, direction.z) * 0.3;
        self
    }

    /// Current vertical speed
    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Current horizontal drift velocity
    pub fn drift(&self) -> Vec3 {
        self.drift
    }

    fn swim(&mut self, dt: f32) {
        let derivative = self.pulse.cos() * self.pulse.frequency;
        if derivative < 0.0 {
            self.vertical_velocity += PROPULSION * dt * -derivative * 0.5;
        }
        self.vertical_velocity -= SINK_RATE * dt;
        self.vertical_velocity *= DRAG;
        self.vertical_velocity = self.vertical_velocity.clamp(VELOCITY_RANGE.0, VELOCITY_RANGE.1);
    }

    fn keep_in_bounds(&mut self) {
        let position = &mut self.node.transform.position;
        if position.y > DEPTH_RANGE.1 {
            position.y = DEPTH_RANGE.1;
            self.vertical_velocity = -0.5;
        }
        if position.y < DEPTH_RANGE.0 {
            position.y = DEPTH_RANGE.0;
            self.vertical_velocity = 1.0;
        }
        if position.x.abs() > HORIZONTAL_BOUND {
            self.drift.x = -self.drift.x;
            position.x = position.x.clamp(-HORIZONTAL_BOUND, HORIZONTAL_BOUND);
        }
        if position.z.abs() > HORIZONTAL_BOUND {
            self.drift.z = -self.drift.z;
            position.z = position.z.clamp(-HORIZONTAL_BOUND, HORIZONTAL_BOUND);
        }
    }
}

impl Entity for Jellyfish {
    fn update(&mut self, _ctx: &mut UpdateContext<'_>, dt: f32) -> bool {
        self.pulse.advance(dt);
        let pulse = self.pulse.sin();

        let width = self.base_scale * (1.0 + pulse * PULSE_AMPLITUDE);
        let height = self.base_scale * (1.0 - pulse * PULSE_AMPLITUDE * 0.6);
        self.node.transform.scale = Vec3::new(width, height, width);

        self.swim(dt);

        let sway = Vec3::new(self.pulse.sin_harmonic(0.2), 0.0, self.pulse.cos_harmonic(0.25)) * 0.01;
        let position = &mut self.node.transform.position;
        position.y += self.vertical_velocity * dt;
        *position += self.drift * dt + sway;

        self.keep_in_bounds();

        // The mesh is modelled Z-up
        self.node.transform.rotation = Vec3::new(
            HALF_PI + pulse * 0.1,
            self.pulse.sin_harmonic(0.1) * 0.15,
            self.pulse.sin_harmonic(0.3) * 0.08,
        );
        true
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let command = DrawCommand::new(&self.resources, *self.node.world_matrix()).with_alpha(self.transparency);
        ctx.with_state(RenderState::BLENDED_TWO_SIDED, |ctx| ctx.draw(&command))
    }

    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn name(&self) -> &'static str {
        "jellyfish"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support::{scene, visual};
    use reef_engine::foundation::random::seeded;
    use reef_engine::render::RecordingBackend;

    #[test]
    fn test_stays_inside_bounds() {
        let mut scene = scene();
        let mut rng = seeded(31);
        let ids: Vec<_> = [Vec3::new(69.0, 7.5, -69.0), Vec3::new(-69.5, -8.8, 69.5), Vec3::new(0.0, -7.0, -60.0)]
            .into_iter()
            .map(|position| {
                let jelly = Jellyfish::new(&mut rng, position, visual(1)).with_drift(Vec3::new(
                    position.x.signum(),
                    0.0,
                    position.z.signum(),
                ));
                scene.add(Box::new(jelly))
            })
            .collect();

        for _ in 0..1200 {
            scene.update(1.0 / 60.0);
            for id in &ids {
                let p = scene.get(*id).expect("jellyfish").node().transform.position;
                assert!((DEPTH_RANGE.0..=DEPTH_RANGE.1).contains(&p.y), "y = {}", p.y);
                assert!(p.x.abs() <= HORIZONTAL_BOUND && p.z.abs() <= HORIZONTAL_BOUND);
            }
        }
    }

    #[test]
    fn test_drift_reverses_at_wall() {
        let mut scene = scene();
        let mut rng = seeded(32);
        let id = scene.add(Box::new(
            Jellyfish::new(&mut rng, Vec3::new(HORIZONTAL_BOUND - 0.001, 0.0, 0.0), visual(1))
                .with_drift(Vec3::new(1.0, 0.0, 0.0)),
        ));

        scene.update(0.1);
        let position = scene.get(id).expect("jellyfish").node().transform.position;
        assert!(position.x <= HORIZONTAL_BOUND);

        scene.update(0.1);
        scene.update(0.1);
        let later = scene.get(id).expect("jellyfish").node().transform.position;
        assert!(later.x < HORIZONTAL_BOUND);
    }

    #[test]
    fn test_velocity_is_clamped() {
        let mut rng = seeded(33);
        let mut jelly = Jellyfish::new(&mut rng, Vec3::zeros(), visual(1));
        jelly.vertical_velocity = 50.0;
        jelly.swim(0.016);
        assert!(jelly.vertical_velocity() <= VELOCITY_RANGE.1);

        jelly.vertical_velocity = -50.0;
        jelly.swim(0.016);
        assert!(jelly.vertical_velocity() >= VELOCITY_RANGE.0);
    }

    #[test]
    fn test_draws_blended_two_sided_and_restores() {
        let mut scene = scene();
        let mut rng = seeded(34);
        scene.add(Box::new(
            Jellyfish::new(&mut rng, Vec3::new(0.0, -5.0, -10.0), visual(1)).with_transparency(0.65),
        ));

        let mut backend = RecordingBackend::new();
        let stats = scene.render(&mut backend);

        assert_eq!(stats.translucent, 1);
        assert_eq!(stats.leaked_state, 0);
        let draw = &backend.draws()[0];
        assert_eq!(draw.state, RenderState::BLENDED_TWO_SIDED);
        approx::assert_relative_eq!(draw.command.color.w, 0.65);
    }
}
