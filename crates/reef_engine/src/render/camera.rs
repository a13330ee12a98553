//! # Scene Camera
//!
//! Perspective camera whose pose is driven by a [`CameraPath`].
//!
//! The projection is computed once from [`CameraConfig`] and never changes.
//! The view matrix is rebuilt from position, target and up on every
//! [`Camera::update`], including paused frames, so it always reflects the
//! latest pose.

use super::camera_path::{CameraPath, CameraPose};
use crate::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Perspective camera with an optional keyframe animation
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation
    pub up: Vec3,

    projection: Mat4,
    view: Mat4,
    path: CameraPath,
}

impl Camera {
    /// Create a camera looking down -Z from the origin
    pub fn new(config: &CameraConfig) -> Self {
        let projection = Mat4::perspective(
            utils::deg_to_rad(config.fov_degrees),
            config.aspect,
            config.near,
            config.far,
        );

        let mut camera = Self {
            position: Vec3::zeros(),
            target: Vec3::new(0.0, 0.0, -1.0),
            up: config.up,
            projection,
            view: Mat4::identity(),
            path: CameraPath::default(),
        };
        camera.update_view();
        camera
    }

    /// Builder pattern: attach a keyframe path
    pub fn with_path(mut self, path: CameraPath) -> Self {
        self.set_path(path);
        self
    }

    /// Replace the keyframe path
    ///
    /// An unusable path is reported but still installed; playback degrades
    /// to a pinned or untouched pose.
    pub fn set_path(&mut self, path: CameraPath) {
        if let Err(e) = path.validate() {
            log::warn!("Camera path will not animate smoothly: {}", e);
        }
        self.path = path;
    }

    /// Manually place the camera
    pub fn set_pose(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
        self.update_view();
    }

    /// Advance the path and rebuild the view matrix
    pub fn update(&mut self, dt: f32) {
        if let Some(CameraPose { position, target }) = self.path.advance(dt) {
            self.position = position;
            self.target = target;
        }
        self.update_view();
    }

    /// Rewind the path to its first keyframe
    pub fn reset_animation(&mut self) {
        self.path.reset();
    }

    /// The keyframe path
    pub fn path(&self) -> &CameraPath {
        &self.path
    }

    /// Mutable access to the keyframe path
    pub fn path_mut(&mut self) -> &mut CameraPath {
        &mut self.path
    }

    /// View matrix for the current pose
    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    /// Projection matrix fixed at construction
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// Combined `projection * view`
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Normalized look direction
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| Vec3::new(0.0, 0.0, -1.0))
    }

    fn update_view(&mut self) {
        let forward = self.target - self.position;
        // A degenerate pose keeps the previous view instead of producing NaNs
        if forward.norm_squared() <= f32::EPSILON || forward.cross(&self.up).norm_squared() <= f32::EPSILON {
            log::trace!("Degenerate camera pose at {:?}, keeping previous view", self.position);
            return;
        }
        self.view = Mat4::look_at(self.position, self.target, self.up);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point3;
    use crate::render::camera_path::Keyframe;
    use approx::assert_relative_eq;

    #[test]
    fn test_projection_fixed_across_updates() {
        let mut camera = Camera::new(&CameraConfig::default()).with_path(CameraPath::new(vec![
            Keyframe::new(0.0, Vec3::new(0.0, 60.0, 0.0), Vec3::new(0.0, 100.0, -50.0)),
            Keyframe::new(5.0, Vec3::new(0.0, 20.0, 30.0), Vec3::new(0.0, 5.0, -20.0)),
        ]));
        let projection = *camera.projection();

        camera.update(1.3);
        camera.update(2.0);
        assert_eq!(*camera.projection(), projection);
    }

    #[test]
    fn test_view_follows_path() {
        let mut camera = Camera::new(&CameraConfig::default()).with_path(CameraPath::new(vec![
            Keyframe::new(0.0, Vec3::new(0.0, 0.0, 10.0), Vec3::zeros()),
            Keyframe::new(2.0, Vec3::new(0.0, 0.0, 20.0), Vec3::zeros()),
        ]));
        camera.update(2.0);
        assert_relative_eq!(camera.position, Vec3::new(0.0, 0.0, 20.0), epsilon = 1e-4);

        let eye = camera.view().transform_point(&Point3::from(camera.position));
        assert_relative_eq!(eye.coords, Vec3::zeros(), epsilon = 1e-4);
    }

    #[test]
    fn test_manual_pose_without_keyframes() {
        let mut camera = Camera::new(&CameraConfig::default());
        camera.set_pose(Vec3::new(3.0, 4.0, 5.0), Vec3::zeros());
        camera.update(1.0);
        assert_eq!(camera.position, Vec3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_degenerate_pose_keeps_finite_view() {
        let mut camera = Camera::new(&CameraConfig::default());
        camera.set_pose(Vec3::zeros(), Vec3::zeros());
        assert!(camera.view().iter().all(|v| v.is_finite()));
    }
}
