//! Reef fish that wander around a school center

use reef_engine::behavior::{Lifetime, PhaseOscillator, School, YawSteering};
use reef_engine::foundation::math::{Transform, Vec3};
use reef_engine::foundation::random::{self, StdRng};
use reef_engine::render::{DrawCommand, RenderContext, RenderError, VisualResources};
use reef_engine::scene::{Entity, Node, UpdateContext};

/// Fish never leave this depth band
pub const DEPTH_RANGE: (f32, f32) = (-8.0, -2.0);

const TURN_RATE: f32 = 1.5;
const WAG: f32 = 0.15;
const PITCH: f32 = 0.05;

/// A swimming fish
///
/// Steers with target-seeking yaw, eases toward the school depth with a
/// slow bob, and wags its body from a tail phase that runs at twice the
/// swim speed. Fins attach as children.
pub struct Fish {
    node: Node,
    resources: VisualResources,
    steering: YawSteering,
    school: School,
    speed: f32,
    tail: PhaseOscillator,
    lifetime: Lifetime,
}

impl Fish {
    /// Create a fish at `position` with a random heading and tail phase
    pub fn new(rng: &mut StdRng, position: Vec3, resources: VisualResources) -> Self {
        let speed = 5.0;
        let steering = YawSteering::random(rng, TURN_RATE);
        Self {
            node: Node::new(Transform::from_position(position).with_uniform_scale(0.5)),
            resources,
            steering,
            school: School::new(Vec3::zeros(), 15.0),
            speed,
            tail: PhaseOscillator::new(random::phase(rng), speed * 2.0),
            lifetime: Lifetime::infinite(),
        }
    }

    /// Builder pattern: set swim speed
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self.tail.frequency = speed * 2.0;
        self
    }

    /// Builder pattern: set the school this fish returns to
    pub fn with_school(mut self, center: Vec3) -> Self {
        self.school.center = center;
        self
    }

    /// Builder pattern: set uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.node.transform.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: remove the fish after `seconds`
    pub fn with_lifetime(mut self, seconds: f32) -> Self {
        self.lifetime = Lifetime::new(seconds);
        self
    }

    /// Current yaw in radians
    pub fn yaw(&self) -> f32 {
        self.steering.yaw
    }

    /// Swim speed in units per second
    pub fn speed(&self) -> f32 {
        self.speed
    }
}

impl Entity for Fish {
    fn update(&mut self, ctx: &mut UpdateContext<'_>, dt: f32) -> bool {
        self.lifetime.tick(dt);
        if self.lifetime.is_expired() {
            return false;
        }

        self.tail.advance(dt);
        let position = self.node.transform.position;
        self.steering.update(ctx.rng(), dt, position, &self.school);

        let transform = &mut self.node.transform;
        transform.position += self.steering.heading() * self.speed * dt;

        let target_y = self.school.center.y + self.tail.sin_harmonic(0.3);
        transform.position.y += (target_y - transform.position.y) * dt * 0.5;
        transform.position.y = transform.position.y.clamp(DEPTH_RANGE.0, DEPTH_RANGE.1);

        transform.rotation = Vec3::new(
            self.tail.sin_harmonic(0.5) * PITCH,
            self.steering.yaw,
            self.tail.sin() * WAG,
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
        "fish"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support::{scene, visual};
    use reef_engine::foundation::random::seeded;

    #[test]
    fn test_fish_stays_in_depth_band() {
        let mut scene = scene();
        let mut rng = seeded(3);
        let id = scene.add(Box::new(
            Fish::new(&mut rng, Vec3::new(0.0, -10.0, 0.0), visual(1)).with_school(Vec3::new(0.0, -10.0, 0.0)),
        ));

        for _ in 0..300 {
            scene.update(1.0 / 60.0);
            let y = scene.get(id).expect("fish").node().transform.position.y;
            assert!((DEPTH_RANGE.0..=DEPTH_RANGE.1).contains(&y), "y = {}", y);
        }
    }

    #[test]
    fn test_fish_moves_at_swim_speed_horizontally() {
        let mut scene = scene();
        let mut rng = seeded(4);
        let start = Vec3::new(0.0, -5.0, 0.0);
        let id = scene.add(Box::new(
            Fish::new(&mut rng, start, visual(1)).with_school(start).with_speed(6.0),
        ));

        scene.update(0.1);
        let moved = scene.get(id).expect("fish").node().transform.position - start;
        let horizontal = Vec3::new(moved.x, 0.0, moved.z).norm();
        approx::assert_relative_eq!(horizontal, 0.6, epsilon = 1e-4);
    }

    #[test]
    fn test_finite_lifetime_expires() {
        let mut scene = scene();
        let mut rng = seeded(5);
        let id = scene.add(Box::new(
            Fish::new(&mut rng, Vec3::new(0.0, -5.0, 0.0), visual(1)).with_lifetime(1.0),
        ));

        for _ in 0..4 {
            scene.update(0.25);
        }
        assert!(scene.contains(id));
        scene.update(0.25);
        assert!(!scene.contains(id));
    }
}
