//! Cinematic camera path
//!
//! Starts high above the surface looking at the sky, dives through the
//! water column, circles the reef at fish height and climbs back out. The
//! last keyframe repeats the first, so the loop is seamless.

use reef_engine::foundation::math::Vec3;
use reef_engine::render::{CameraPath, Keyframe};

/// (time, position, target) for every keyframe
const KEYFRAMES: [(f32, [f32; 3], [f32; 3]); 22] = [
    // Above the surface, panning across the sky
    (0.0, [0.0, 60.0, 0.0], [0.0, 100.0, -50.0]),
    (4.0, [0.0, 60.0, 0.0], [50.0, 90.0, -30.0]),
    (8.0, [0.0, 60.0, 0.0], [-50.0, 80.0, -40.0]),
    (12.0, [0.0, 60.0, 0.0], [0.0, 70.0, -60.0]),
    // Descent
    (16.0, [0.0, 50.0, 0.0], [0.0, 30.0, -80.0]),
    (20.0, [0.0, 35.0, 0.0], [0.0, -15.0, -100.0]),
    (25.0, [0.0, 15.0, 0.0], [0.0, -50.0, -80.0]),
    (30.0, [0.0, 5.0, 0.0], [0.0, -30.0, -60.0]),
    (35.0, [0.0, -5.0, 0.0], [0.0, -20.0, -40.0]),
    (40.0, [0.0, -8.0, 10.0], [0.0, -15.0, -30.0]),
    (45.0, [0.0, -10.0, 20.0], [0.0, -14.0, -20.0]),
    // Circling the reef
    (50.0, [0.0, -11.0, 30.0], [0.0, -13.0, 0.0]),
    (58.0, [30.0, -10.0, 0.0], [0.0, -12.0, 0.0]),
    (66.0, [25.0, -9.0, -25.0], [-10.0, -12.0, 0.0]),
    (74.0, [0.0, -10.0, -35.0], [0.0, -12.0, 15.0]),
    (82.0, [-25.0, -9.0, -25.0], [10.0, -12.0, 0.0]),
    (90.0, [-30.0, -10.0, 0.0], [0.0, -12.0, 0.0]),
    (98.0, [-20.0, -9.0, 25.0], [10.0, -12.0, 0.0]),
    // Ascent
    (105.0, [0.0, -8.0, 30.0], [0.0, -10.0, 0.0]),
    (112.0, [0.0, 0.0, 20.0], [0.0, 5.0, -30.0]),
    (120.0, [0.0, 30.0, 10.0], [0.0, 50.0, -50.0]),
    (130.0, [0.0, 60.0, 0.0], [0.0, 100.0, -50.0]),
];

/// The full tour as a looping path
pub fn reef_tour() -> CameraPath {
    CameraPath::new(
        KEYFRAMES
            .iter()
            .map(|(time, position, target)| Keyframe::new(*time, Vec3::from(*position), Vec3::from(*target)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tour_is_well_formed() {
        let path = reef_tour();
        assert!(path.validate().is_ok());
        assert_relative_eq!(path.duration(), 130.0);
    }

    #[test]
    fn test_tour_loops_seamlessly() {
        let path = reef_tour();
        let start = path.pose_at(0.0).expect("start pose");
        let end = path.pose_at(130.0).expect("end pose");
        assert_relative_eq!(start.position, end.position);
        assert_relative_eq!(start.target, end.target);
    }

    #[test]
    fn test_tour_reaches_the_reef() {
        let path = reef_tour();
        let pose = path.pose_at(74.0).expect("reef pose");
        assert_relative_eq!(pose.position, Vec3::new(0.0, -10.0, -35.0), epsilon = 1e-5);
        assert!(pose.position.y < 0.0);
    }
}
