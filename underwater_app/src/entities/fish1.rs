//! Second fish species

use reef_engine::behavior::{PhaseOscillator, School, YawSteering};
use reef_engine::foundation::math::{Transform, Vec3};
use reef_engine::foundation::random::{self, StdRng};
use reef_engine::render::{DrawCommand, RenderContext, RenderError, VisualResources};
use reef_engine::scene::{Entity, Node, UpdateContext};

/// A slower, smaller fish with a looser school
///
/// Shares the steering of [`Fish`](super::Fish) but has no depth band and
/// no fins. Its model faces the other way, so the mesh yaw is mirrored.
pub struct Fish1 {
    node: Node,
    resources: VisualResources,
    steering: YawSteering,
    school: School,
    speed: f32,
    swim: PhaseOscillator,
    sway: f32,
}

impl Fish1 {
    /// Create a fish at `position` with a random heading
    pub fn new(rng: &mut StdRng, position: Vec3, resources: VisualResources) -> Self {
        let speed = 3.0;
        let swim = PhaseOscillator::new(random::phase(rng), speed * 2.0);
        let yaw = random::phase(rng);
        let first_turn = random::range(rng, 3.0, 7.0);
        Self {
            node: Node::new(Transform::from_position(position).with_uniform_scale(0.3)),
            resources,
            steering: YawSteering::new(yaw, 1.0, first_turn),
            school: School::new(Vec3::zeros(), 20.0),
            speed,
            swim,
            sway: 0.15,
        }
    }

    /// Builder pattern: set swim speed
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self.swim.frequency = speed * 2.0;
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
}

impl Entity for Fish1 {
    fn update(&mut self, ctx: &mut UpdateContext<'_>, dt: f32) -> bool {
        self.swim.advance(dt);
        let position = self.node.transform.position;
        self.steering.update(ctx.rng(), dt, position, &self.school);

        let transform = &mut self.node.transform;
        transform.position += self.steering.heading() * self.speed * dt;

        let target_y = self.school.center.y + self.swim.sin_harmonic(0.3);
        transform.position.y += (target_y - transform.position.y) * dt * 0.5;

        transform.rotation = Vec3::new(
            self.swim.sin_harmonic(0.5) * 0.05,
            -self.steering.yaw,
            self.swim.sin() * self.sway,
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
        "fish1"
    }
}
