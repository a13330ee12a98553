//! Target-seeking yaw steering
//!
//! A swimmer keeps a current yaw and a target yaw. Each frame the signed gap
//! is wrapped into `(-π, π]` and closed exponentially at the turn rate. Every
//! few seconds a new target is picked: back towards the school center when
//! the swimmer has strayed past the school radius, otherwise a small random
//! perturbation of the current heading.

use crate::foundation::math::{constants::{PI, TAU}, Vec3};
use crate::foundation::random::{self, Rng};

/// Wrap an angle into `(-π, π]`
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut wrapped = angle % TAU;
    if wrapped > PI {
        wrapped -= TAU;
    } else if wrapped <= -PI {
        wrapped += TAU;
    }
    wrapped
}

/// Yaw that faces from `from` towards `to` in the horizontal plane
///
/// Zero yaw faces +Z, positive yaw turns towards +X.
pub fn yaw_towards(from: Vec3, to: Vec3) -> f32 {
    let offset = to - from;
    offset.x.atan2(offset.z)
}

/// Horizontal unit heading for a yaw
pub fn heading(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Region a swimmer loosely stays within
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct School {
    /// Center of the school
    pub center: Vec3,
    /// Distance beyond which swimmers turn back
    pub radius: f32,
}

impl School {
    /// Create a school
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether `position` has strayed past the radius
    pub fn is_outside(&self, position: Vec3) -> bool {
        (self.center - position).norm() > self.radius
    }
}

/// Smoothed yaw with periodic retargeting
#[derive(Debug, Clone, PartialEq)]
pub struct YawSteering {
    /// Current heading in radians
    pub yaw: f32,
    /// Heading being turned towards
    pub target_yaw: f32,
    /// Fraction of the remaining gap closed per second
    pub turn_rate: f32,
    /// Range for the delay between retargets, in seconds
    pub turn_interval: (f32, f32),
    since_turn: f32,
    next_turn: f32,
}

impl YawSteering {
    /// Steering holding `yaw` with the first retarget after `first_turn` seconds
    pub fn new(yaw: f32, turn_rate: f32, first_turn: f32) -> Self {
        Self {
            yaw,
            target_yaw: yaw,
            turn_rate,
            turn_interval: (3.0, 7.0),
            since_turn: 0.0,
            next_turn: first_turn,
        }
    }

    /// Random heading with the first retarget in 2 to 6 seconds
    pub fn random<R: Rng + ?Sized>(rng: &mut R, turn_rate: f32) -> Self {
        let yaw = random::phase(rng);
        let first_turn = random::range(rng, 2.0, 6.0);
        Self::new(yaw, turn_rate, first_turn)
    }

    /// Point the target at a world position
    pub fn set_target(&mut self, from: Vec3, to: Vec3) {
        self.target_yaw = yaw_towards(from, to);
    }

    /// Close part of the gap to the target and return the new yaw
    ///
    /// The step never exceeds the gap, so the yaw cannot overshoot.
    pub fn step(&mut self, dt: f32) -> f32 {
        let gap = normalize_angle(self.target_yaw - self.yaw);
        let factor = (self.turn_rate * dt.max(0.0)).min(1.0);
        self.yaw += gap * factor;
        self.yaw
    }

    /// Pick a new target yaw for a swimmer at `position`
    pub fn retarget<R: Rng + ?Sized>(&mut self, rng: &mut R, position: Vec3, school: &School) {
        self.target_yaw = if school.is_outside(position) {
            yaw_towards(position, school.center)
        } else {
            self.yaw + random::centered(rng, 2.0)
        };
    }

    /// Run the turn timer, retarget when due, then step
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, dt: f32, position: Vec3, school: &School) -> f32 {
        self.since_turn += dt.max(0.0);
        if self.since_turn >= self.next_turn {
            self.since_turn = 0.0;
            self.next_turn = random::range(rng, self.turn_interval.0, self.turn_interval.1);
            self.retarget(rng, position, school);
        }
        self.step(dt)
    }

    /// Horizontal unit heading for the current yaw
    pub fn heading(&self) -> Vec3 {
        heading(self.yaw)
    }
}
