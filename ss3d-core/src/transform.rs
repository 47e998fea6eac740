/// Object rotation and camera offset applied to each frame's triangles
use nalgebra::{Matrix3, Point3};

use crate::config::{CameraConfig, RotationStep};
use crate::geometry::Triangle;

/// Rotation state around three axes plus the camera orbit angle (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub orbit: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, orbit: 0.0 }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            orbit: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Advance all angles by one frame's increments
    pub fn advance(&mut self, step: &RotationStep, camera: &CameraConfig) {
        self.rotate(step.x, step.y, step.z);
        self.orbit += camera.orbit_speed;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for the per-frame mesh pass
pub struct Transform;

impl Transform {
    /// Rotation about X, then Y, then Z, composed into one matrix
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix3<f32> {
        let (sin_x, cos_x) = rotation.x.sin_cos();
        let (sin_y, cos_y) = rotation.y.sin_cos();
        let (sin_z, cos_z) = rotation.z.sin_cos();

        Matrix3::new(
            cos_y * cos_z,
            sin_x * sin_y * cos_z - cos_x * sin_z,
            cos_x * sin_y * cos_z + sin_x * sin_z,
            cos_y * sin_z,
            sin_x * sin_y * sin_z + cos_x * cos_z,
            cos_x * sin_y * sin_z - sin_x * cos_z,
            -sin_y,
            sin_x * cos_y,
            cos_x * cos_y,
        )
    }

    pub fn apply_rotation(point: &Point3<f32>, matrix: &Matrix3<f32>) -> Point3<f32> {
        Point3::from(matrix * point.coords)
    }

    /// Shift the scene opposite to a virtual camera swaying on x and bobbing on y
    pub fn apply_camera_offset(
        point: &Point3<f32>,
        orbit: f32,
        camera: &CameraConfig,
    ) -> Point3<f32> {
        let sway_x = orbit.cos() * camera.horizontal_amount;
        let bob_y = (orbit * camera.vertical_speed / camera.orbit_speed).sin() * camera.vertical_amount;
        Point3::new(point.x - sway_x, point.y - bob_y, point.z)
    }

    /// Rotate and offset a copy of `triangle`; the input is never modified
    pub fn transform_triangle(
        triangle: &Triangle,
        matrix: &Matrix3<f32>,
        orbit: f32,
        camera: &CameraConfig,
    ) -> Triangle {
        triangle.map_vertices(|v| {
            let rotated = Self::apply_rotation(&v, matrix);
            Self::apply_camera_offset(&rotated, orbit, camera)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Rotation3, Vector3};

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
        assert!((state.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_advance_moves_orbit() {
        let mut state = RotationState::zero();
        let step = RotationStep::default();
        let camera = CameraConfig {
            orbit_speed: 0.25,
            ..CameraConfig::default()
        };
        state.advance(&step, &camera);
        state.advance(&step, &camera);
        assert!((state.x - 2.0 * step.x).abs() < 1e-6);
        assert!((state.orbit - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation);
        assert!((matrix - Matrix3::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_matches_composed_axis_rotations() {
        let rotation = RotationState::new(0.4, -1.1, 2.3);
        let matrix = Transform::rotation_matrix(&rotation);
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), rotation.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), rotation.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), rotation.z);
        let composed = (rz * ry * rx).into_inner();
        assert!((matrix - composed).norm() < 1e-5);
    }

    #[test]
    fn test_camera_offset() {
        let camera = CameraConfig::default();
        let origin = Point3::origin();

        let at_zero = Transform::apply_camera_offset(&origin, 0.0, &camera);
        assert!((at_zero.x + camera.horizontal_amount).abs() < 1e-6);
        assert!(at_zero.y.abs() < 1e-6);

        // Bob runs at half the orbit rate with the default speeds
        let orbit = std::f32::consts::PI;
        let moved = Transform::apply_camera_offset(&origin, orbit, &camera);
        assert!((moved.x - camera.horizontal_amount).abs() < 1e-4);
        assert!((moved.y + camera.vertical_amount).abs() < 1e-4);
        assert_eq!(moved.z, 0.0);
    }

    #[test]
    fn test_transform_leaves_template_untouched() {
        let template = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        let snapshot = template;
        let matrix = Transform::rotation_matrix(&RotationState::new(0.0, std::f32::consts::PI, 0.0));
        let camera = CameraConfig {
            horizontal_amount: 0.0,
            vertical_amount: 0.0,
            ..CameraConfig::default()
        };

        let moved = Transform::transform_triangle(&template, &matrix, 0.0, &camera);
        assert_eq!(template, snapshot);
        // Half turn about y flips the facing
        assert!((moved.normal().z + 1.0).abs() < 1e-5);
    }
}
