//! Lifetime tracking
//!
//! Age accumulated from frame deltas, so a paused scene does not age.

/// Age against a fixed duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    /// Seconds lived so far
    pub age: f32,
    /// How long the owner should live; non-positive means forever
    pub duration: f32,
}

impl Lifetime {
    /// Create a fresh lifetime
    pub fn new(duration: f32) -> Self {
        Self { age: 0.0, duration }
    }

    /// A lifetime that never expires
    pub fn infinite() -> Self {
        Self::new(0.0)
    }

    /// Whether this lifetime ever ends
    pub fn is_infinite(&self) -> bool {
        self.duration <= 0.0
    }

    /// Add `dt` seconds of age
    pub fn tick(&mut self, dt: f32) {
        self.age += dt.max(0.0);
    }

    /// Check if the age has passed the duration
    pub fn is_expired(&self) -> bool {
        !self.is_infinite() && self.age > self.duration
    }

    /// Get remaining lifetime in seconds
    pub fn remaining(&self) -> f32 {
        if self.is_infinite() {
            f32::INFINITY
        } else {
            (self.duration - self.age).max(0.0)
        }
    }

    /// Fraction of life used, in `[0, 1]`; always zero when infinite
    pub fn fraction(&self) -> f32 {
        if self.is_infinite() {
            0.0
        } else {
            (self.age / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Linear fade from 1 to 0 over the final `tail` fraction of life
    pub fn fade_out(&self, tail: f32) -> f32 {
        let fraction = self.fraction();
        let start = 1.0 - tail;
        if tail <= 0.0 || fraction <= start {
            1.0
        } else {
            (1.0 - (fraction - start) / tail).max(0.0)
        }
    }
}
