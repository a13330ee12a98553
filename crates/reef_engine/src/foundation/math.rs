//! Math utilities and types
//!
//! Provides fundamental math types for 3D scene composition.

pub use nalgebra::{Matrix3, Matrix4, Unit, Vector2, Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Transform representing position, Euler rotation, and scale
///
/// Rotation angles are radians about the X, Y and Z axes. The composed
/// matrix is always `T * Rz * Ry * Rx * S`, so X is applied first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Euler rotation in radians (applied X, then Y, then Z)
    pub rotation: Vec3,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: set uniform scale
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: set Euler rotation
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Convert to a local transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * Mat4::rotation_z(self.rotation.z)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_x(self.rotation.x)
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Compose with an optional parent world matrix: `ParentWorld * Local`
    pub fn to_world_matrix(&self, parent_world: Option<&Mat4>) -> Mat4 {
        let local = self.to_matrix();
        match parent_world {
            Some(parent) => parent * local,
            None => local,
        }
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }
}

/// Extract the translation column of an affine matrix
pub fn translation_of(matrix: &Mat4) -> Vec3 {
    Vec3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)])
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Hermite smoothstep ease `t^2 (3 - 2t)` on a parameter clamped to [0, 1]
    pub fn smoothstep(t: f32) -> f32 {
        let t = clamp(t, 0.0, 1.0);
        t * t * (3.0 - 2.0 * t)
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Create a right-handed perspective projection matrix with OpenGL depth range
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = -(far + near) / (far - near);
        result[(2, 3)] = -(2.0 * far * near) / (far - near);
        result[(3, 2)] = -1.0;

        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let right = forward.cross(&up).normalize();
        let camera_up = right.cross(&forward);

        let translation = Mat4::new(
            1.0, 0.0, 0.0, -eye.x,
            0.0, 1.0, 0.0, -eye.y,
            0.0, 0.0, 1.0, -eye.z,
            0.0, 0.0, 0.0, 1.0,
        );

        let rotation = Mat4::new(
            right.x, right.y, right.z, 0.0,
            camera_up.x, camera_up.y, camera_up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        rotation * translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use constants::HALF_PI;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_identity_transform_is_identity_matrix() {
        assert_relative_eq!(Transform::identity().to_matrix(), Mat4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_order_applies_x_before_z() {
        // X by 90° sends +Y to +Z; Z by 90° then leaves +Z untouched
        let transform = Transform::identity().with_rotation(Vec3::new(HALF_PI, 0.0, HALF_PI));
        let p = transform.transform_point(Point3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(p.coords, Vec3::new(0.0, 0.0, 1.0), epsilon = EPSILON);

        // Reversed order would send +Y to -X first and then leave it in the XY plane
        let swapped = Mat4::rotation_x(HALF_PI) * Mat4::rotation_z(HALF_PI);
        let q = swapped.transform_point(&Point3::new(0.0, 1.0, 0.0));
        assert!((q.coords - p.coords).norm() > 0.5);
    }

    #[test]
    fn test_scale_applied_before_translation() {
        let transform = Transform {
            position: Vec3::new(10.0, 0.0, 0.0),
            rotation: Vec3::zeros(),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };
        let p = transform.transform_point(Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.coords, Vec3::new(12.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_world_matrix_composes_parent_first() {
        let parent = Transform::from_position(Vec3::new(0.0, 5.0, 0.0))
            .with_rotation(Vec3::new(0.0, HALF_PI, 0.0));
        let child = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));

        let world = child.to_world_matrix(Some(&parent.to_matrix()));
        // +X rotated 90° about Y becomes -Z
        assert_relative_eq!(translation_of(&world), Vec3::new(0.0, 5.0, -1.0), epsilon = EPSILON);

        let orphan = child.to_world_matrix(None);
        assert_relative_eq!(orphan, child.to_matrix(), epsilon = EPSILON);
    }

    #[test]
    fn test_smoothstep_endpoints_and_clamp() {
        assert_relative_eq!(utils::smoothstep(0.0), 0.0);
        assert_relative_eq!(utils::smoothstep(1.0), 1.0);
        assert_relative_eq!(utils::smoothstep(0.5), 0.5);
        assert_relative_eq!(utils::smoothstep(0.25), 0.156_25);
        assert_relative_eq!(utils::smoothstep(-3.0), 0.0);
        assert_relative_eq!(utils::smoothstep(7.0), 1.0);
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let view = Mat4::look_at(eye, Vec3::zeros(), Vec3::y());
        let p = view.transform_point(&Point3::from(eye));
        assert_relative_eq!(p.coords, Vec3::zeros(), epsilon = EPSILON);

        // Target lies straight ahead on -Z in view space
        let t = view.transform_point(&Point3::origin());
        assert_relative_eq!(t.coords, Vec3::new(0.0, 0.0, -5.0), epsilon = EPSILON);
    }
}
