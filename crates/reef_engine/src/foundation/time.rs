//! Time management utilities

use std::time::Instant;

/// Source of frame deltas for a [`FrameClock`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeSource {
    /// Measure wall-clock time between ticks
    RealTime,
    /// Advance by a constant step every tick (headless runs, tests)
    FixedStep(f32),
}

/// Frame clock with pause support
///
/// While paused, [`FrameClock::tick`] reports a zero delta so scene state is
/// frozen, but the frame is still driven so matrices are regenerated.
#[derive(Debug)]
pub struct FrameClock {
    source: TimeSource,
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    paused: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TimeSource::RealTime)
    }
}

impl FrameClock {
    /// Create a new clock
    pub fn new(source: TimeSource) -> Self {
        Self {
            source,
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            paused: false,
        }
    }

    /// Create a clock that advances by a fixed step each tick
    pub fn fixed_step(step: f32) -> Self {
        Self::new(TimeSource::FixedStep(step.max(0.0)))
    }

    /// Advance one frame and return the delta to feed the scene
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let measured = match self.source {
            TimeSource::RealTime => now.duration_since(self.last_frame).as_secs_f32(),
            TimeSource::FixedStep(step) => step,
        };
        self.last_frame = now;
        self.frame_count += 1;

        self.delta_time = if self.paused { 0.0 } else { measured };
        self.total_time += self.delta_time;
        self.delta_time
    }

    /// Freeze time advancement
    pub fn pause(&mut self) {
        if !self.paused {
            log::info!("Animation paused at {:.2}s", self.total_time);
        }
        self.paused = true;
    }

    /// Resume time advancement
    pub fn resume(&mut self) {
        if self.paused {
            log::info!("Animation resumed at {:.2}s", self.total_time);
        }
        self.paused = false;
    }

    /// Flip between paused and running, returning the new paused state
    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    /// Whether the clock is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Delta reported by the last tick
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Total unpaused time since creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of ticks so far, including paused ones
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average ticks per unpaused second
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
