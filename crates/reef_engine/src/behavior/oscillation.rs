//! Phase-accumulator oscillation
//!
//! Wobble, pulse, sway and flap motions all advance a phase by
//! `frequency * dt` each frame and read `sin`/`cos` of it or of a harmonic.
//! Randomized starting phase and frequency keep groups out of sync.

use crate::foundation::random::{self, Rng};

/// A phase advancing at a fixed angular frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseOscillator {
    /// Current phase in radians
    pub phase: f32,
    /// Angular frequency in radians per second
    pub frequency: f32,
}

impl PhaseOscillator {
    /// Create an oscillator
    pub fn new(phase: f32, frequency: f32) -> Self {
        Self { phase, frequency }
    }

    /// Random phase in `[0, 2π)` and frequency in `[min, max)`
    pub fn random<R: Rng + ?Sized>(rng: &mut R, min_frequency: f32, max_frequency: f32) -> Self {
        Self {
            phase: random::phase(rng),
            frequency: random::range(rng, min_frequency, max_frequency),
        }
    }

    /// Advance by `dt` seconds and return the new phase
    ///
    /// The phase is never wrapped, so fractional harmonics stay continuous.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.phase += self.frequency * dt;
        self.phase
    }

    /// `sin(phase)`
    pub fn sin(&self) -> f32 {
        self.phase.sin()
    }

    /// `cos(phase)`
    pub fn cos(&self) -> f32 {
        self.phase.cos()
    }

    /// `sin(phase * harmonic)`
    pub fn sin_harmonic(&self, harmonic: f32) -> f32 {
        (self.phase * harmonic).sin()
    }

    /// `cos(phase * harmonic)`
    pub fn cos_harmonic(&self, harmonic: f32) -> f32 {
        (self.phase * harmonic).cos()
    }

    /// Pulse shape in `[0, 1]`: `(sin(phase) + 1) / 2`
    pub fn pulse(&self) -> f32 {
        0.5 * (self.sin() + 1.0)
    }
}
