//! Orbit camera.

use bevy_math::{Mat4, Vec3};

/// A camera on a spherical orbit around a fixed focus point.
///
/// The eye position is parameterized by yaw and pitch in degrees at a fixed
/// radius; the focus stays at the origin and up stays +Y.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    /// Rotation around the up axis, degrees.
    pub yaw: f32,
    /// Elevation above the ground plane, degrees.
    pub pitch: f32,
    /// Distance from the focus point.
    pub radius: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: -90.0,
            pitch: 30.0,
            radius: 5.0,
        }
    }
}

impl OrbitCamera {
    /// Eye position in world space.
    pub fn eye(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(
            self.radius * yaw.cos() * pitch.cos(),
            self.radius * pitch.sin(),
            self.radius * yaw.sin() * pitch.cos(),
        )
    }

    /// Left-handed view matrix looking at the origin.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.eye(), Vec3::ZERO, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn default_orbit_eye_position() {
        let camera = OrbitCamera::default();
        let eye = camera.eye();
        // yaw -90, pitch 30, radius 5 sits on the -Z side, 2.5 up.
        assert!(close(eye.x, 0.0), "eye.x = {}", eye.x);
        assert!(close(eye.y, 2.5), "eye.y = {}", eye.y);
        assert!(close(eye.z, -5.0 * 30.0_f32.to_radians().cos()), "eye.z = {}", eye.z);
    }

    #[test]
    fn eye_stays_on_the_radius() {
        let camera = OrbitCamera {
            yaw: 37.0,
            pitch: -12.0,
            radius: 5.0,
        };
        assert!(close(camera.eye().length(), 5.0));
    }

    #[test]
    fn view_matrix_moves_eye_to_origin() {
        let camera = OrbitCamera::default();
        let moved = camera.view_matrix().transform_point3(camera.eye());
        assert!(moved.length() < 1e-4);
    }
}
