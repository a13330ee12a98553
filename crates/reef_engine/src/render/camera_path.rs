//! # Camera Path Animation
//!
//! A looping, smoothstep-eased walk through timestamped camera poses.
//!
//! The path is sampled once per frame from [`Camera::update`](super::Camera::update).
//! It never fails a frame: sequences that are too short or not strictly
//! increasing in time degrade to pinned or snapped poses, and
//! [`CameraPath::validate`] reports the problem so callers can log it.

use crate::foundation::math::{utils, Vec3};
use serde::{Deserialize, Serialize};

/// Segments shorter than this snap straight to their end pose
const MIN_SEGMENT_DURATION: f32 = 1e-6;

/// One control point of a camera path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Path time in seconds
    pub time: f32,
    /// Camera position at this time
    pub position: Vec3,
    /// Look-at target at this time
    pub target: Vec3,
}

impl Keyframe {
    /// Create a keyframe
    pub fn new(time: f32, position: Vec3, target: Vec3) -> Self {
        Self { time, position, target }
    }

    fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            target: self.target,
        }
    }
}

/// Interpolated camera position and look-at target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Camera position
    pub position: Vec3,
    /// Look-at target
    pub target: Vec3,
}

/// Playback state of a [`CameraPath`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Stopped; the camera pose is left as externally set
    Idle,
    /// Advancing with every frame
    Playing,
}

/// Problems detected in a keyframe sequence
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CameraPathError {
    /// Fewer than two keyframes cannot animate
    #[error("camera path needs at least 2 keyframes to animate, has {0}")]
    TooFewKeyframes(usize),

    /// Keyframe times must strictly increase
    #[error("keyframe {index} at t={time} does not come after t={previous}")]
    NonIncreasingTime {
        /// Offending keyframe index
        index: usize,
        /// Its time
        time: f32,
        /// Time of the keyframe before it
        previous: f32,
    },
}

/// Looping keyframe animation for a camera
#[derive(Debug, Clone)]
pub struct CameraPath {
    keyframes: Vec<Keyframe>,
    time: f32,
    segment: usize,
    state: PlaybackState,
}

impl Default for CameraPath {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CameraPath {
    /// Create a path in the playing state
    pub fn new(keyframes: Vec<Keyframe>) -> Self {
        Self {
            keyframes,
            time: 0.0,
            segment: 0,
            state: PlaybackState::Playing,
        }
    }

    /// Append a keyframe; callers keep times ascending
    pub fn push(&mut self, keyframe: Keyframe) {
        self.keyframes.push(keyframe);
    }

    /// Keyframes in insertion order
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Current animation time
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Playback state
    pub fn state(&self) -> PlaybackState {
        if self.keyframes.is_empty() {
            PlaybackState::Idle
        } else {
            self.state
        }
    }

    /// Time of the last keyframe, or zero for an empty path
    pub fn duration(&self) -> f32 {
        self.keyframes.last().map_or(0.0, |k| k.time.max(0.0))
    }

    /// Rewind to the start without leaving the playing state
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.segment = 0;
    }

    /// Resume advancing
    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    /// Stop advancing; the camera keeps whatever pose it has
    pub fn stop(&mut self) {
        self.state = PlaybackState::Idle;
    }

    /// Check that the path can animate smoothly
    pub fn validate(&self) -> Result<(), CameraPathError> {
        if self.keyframes.len() < 2 {
            return Err(CameraPathError::TooFewKeyframes(self.keyframes.len()));
        }
        for (index, pair) in self.keyframes.windows(2).enumerate() {
            // Written as a negation so NaN times are rejected too
            if !(pair[1].time > pair[0].time) {
                return Err(CameraPathError::NonIncreasingTime {
                    index: index + 1,
                    time: pair[1].time,
                    previous: pair[0].time,
                });
            }
        }
        Ok(())
    }

    /// Advance by `dt` and return the pose to apply
    ///
    /// Returns `None` when the camera should be left alone: the path is
    /// stopped or has no keyframes. A single keyframe pins the pose.
    /// Negative or non-finite deltas are treated as zero.
    pub fn advance(&mut self, dt: f32) -> Option<CameraPose> {
        if self.state == PlaybackState::Idle {
            return None;
        }

        match self.keyframes.len() {
            0 => None,
            1 => Some(self.keyframes[0].pose()),
            _ => {
                let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
                self.time += dt;

                let duration = self.duration();
                if self.time > duration {
                    self.time = 0.0;
                    self.segment = 0;
                    log::trace!("Camera path looped, t={:.3}", self.time);
                }

                self.segment = self.find_segment(self.segment, self.time);
                Some(self.interpolate(self.segment, self.time))
            }
        }
    }

    /// Pose at an arbitrary path time
    ///
    /// Times past the end are wrapped into the loop by modulo. Playback
    /// through [`advance`](Self::advance) instead restarts at zero.
    pub fn pose_at(&self, time: f32) -> Option<CameraPose> {
        match self.keyframes.len() {
            0 => None,
            1 => Some(self.keyframes[0].pose()),
            _ => {
                let duration = self.duration();
                let mut time = if time.is_finite() { time.max(0.0) } else { 0.0 };
                if time > duration {
                    time = if duration > 0.0 { time % duration } else { 0.0 };
                }
                let segment = self.find_segment(0, time);
                Some(self.interpolate(segment, time))
            }
        }
    }

    /// Forward scan for the segment whose end is the first keyframe after `time`
    fn find_segment(&self, start: usize, time: f32) -> usize {
        let last_segment = self.keyframes.len() - 2;
        let mut segment = start.min(last_segment);
        while segment < last_segment && self.keyframes[segment + 1].time <= time {
            segment += 1;
        }
        segment
    }

    fn interpolate(&self, segment: usize, time: f32) -> CameraPose {
        let from = &self.keyframes[segment];
        let to = &self.keyframes[segment + 1];

        let span = to.time - from.time;
        let t = if span > MIN_SEGMENT_DURATION {
            utils::clamp((time - from.time) / span, 0.0, 1.0)
        } else {
            1.0
        };
        let eased = utils::smoothstep(t);

        CameraPose {
            position: from.position.lerp(&to.position, eased),
            target: from.target.lerp(&to.target, eased),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    fn two_point_path() -> CameraPath {
        CameraPath::new(vec![
            Keyframe::new(0.0, Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
            Keyframe::new(10.0, Vec3::new(10.0, 0.0, 0.0), Vec3::new(10.0, 0.0, -1.0)),
        ])
    }

    #[test]
    fn test_loop_is_seamless() {
        let mut path = two_point_path();
        let start = path.advance(0.0).expect("pose");
        path.advance(10.0);
        let after_loop = path.advance(0.5).expect("pose");

        assert_eq!(path.time(), 0.0);
        assert_relative_eq!(after_loop.position, start.position, epsilon = EPSILON);
        assert_relative_eq!(after_loop.target, start.target, epsilon = EPSILON);

        let next = path.advance(0.5).expect("pose");
        assert_relative_eq!(next.position, path.pose_at(0.5).expect("pose").position, epsilon = EPSILON);
    }

    #[test]
    fn test_overshoot_restarts_from_first_keyframe() {
        let mut path = two_point_path();
        path.advance(9.9);
        let pose = path.advance(0.5).expect("pose");
        assert_eq!(path.time(), 0.0);
        assert_relative_eq!(pose.position, Vec3::new(0.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(pose.target, Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);

        let mut jump = two_point_path();
        jump.advance(12.0);
        assert_eq!(jump.time(), 0.0);
    }

    #[test]
    fn test_sampling_wraps_by_modulo() {
        let path = two_point_path();
        let wrapped = path.pose_at(12.0).expect("pose");
        assert_relative_eq!(wrapped.position, path.pose_at(2.0).expect("pose").position, epsilon = EPSILON);
    }

    #[test]
    fn test_midpoint_and_quarter_are_eased() {
        let path = two_point_path();

        // The ease is symmetric, so the halfway point agrees with linear
        let mid = path.pose_at(5.0).expect("pose");
        assert_relative_eq!(mid.position.x, 5.0, epsilon = EPSILON);

        // At a quarter of the way smoothstep gives 0.15625 rather than 0.25
        let quarter = path.pose_at(2.5).expect("pose");
        assert_relative_eq!(quarter.position.x, 1.5625, epsilon = EPSILON);
        assert!((quarter.position.x - 2.5).abs() > 0.5);
    }

    #[test]
    fn test_single_keyframe_pins_pose() {
        let position = Vec3::new(1.0, 2.0, 3.0);
        let target = Vec3::new(0.0, 0.0, 0.0);
        let mut path = CameraPath::new(vec![Keyframe::new(4.0, position, target)]);

        for dt in [0.0, 0.016, 5.0, 100.0, -1.0] {
            let pose = path.advance(dt).expect("pinned pose");
            assert_eq!(pose.position, position);
            assert_eq!(pose.target, target);
        }
        assert!(path.validate().is_err());
    }

    #[test]
    fn test_empty_path_leaves_pose_alone() {
        let mut path = CameraPath::default();
        assert_eq!(path.advance(1.0), None);
        assert_eq!(path.state(), PlaybackState::Idle);
        assert_eq!(path.validate(), Err(CameraPathError::TooFewKeyframes(0)));
    }

    #[test]
    fn test_stopped_path_yields_nothing() {
        let mut path = two_point_path();
        path.stop();
        assert_eq!(path.advance(1.0), None);
        assert_eq!(path.time(), 0.0);
        path.play();
        assert!(path.advance(1.0).is_some());
    }

    #[test]
    fn test_reset_rewinds() {
        let mut path = two_point_path();
        path.advance(7.0);
        path.reset();
        assert_eq!(path.time(), 0.0);
        let pose = path.advance(0.0).expect("pose");
        assert_relative_eq!(pose.position, Vec3::zeros(), epsilon = EPSILON);
    }

    #[test]
    fn test_malformed_times_degrade() {
        let mut path = CameraPath::new(vec![
            Keyframe::new(0.0, Vec3::new(0.0, 0.0, 0.0), Vec3::z()),
            Keyframe::new(5.0, Vec3::new(5.0, 0.0, 0.0), Vec3::z()),
            Keyframe::new(5.0, Vec3::new(9.0, 0.0, 0.0), Vec3::z()),
            Keyframe::new(10.0, Vec3::new(10.0, 0.0, 0.0), Vec3::z()),
        ]);
        assert!(matches!(
            path.validate(),
            Err(CameraPathError::NonIncreasingTime { index: 2, .. })
        ));

        // Every frame still produces a finite pose
        for _ in 0..40 {
            let pose = path.advance(0.37).expect("pose");
            assert!(pose.position.iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_nan_delta_is_ignored() {
        let mut path = two_point_path();
        path.advance(1.0);
        path.advance(f32::NAN);
        assert_relative_eq!(path.time(), 1.0);
    }
}
