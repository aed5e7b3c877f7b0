//! Drawable descriptors.
//!
//! Each drawable owns one constant-buffer slot and a phase angle on the
//! shared orbit; the frame loop iterates the descriptor sequence uniformly
//! instead of special-casing individual objects.

use bevy_math::{Mat4, Vec3};

/// Radius of the orbit the cubes travel, world units.
pub const ORBIT_RADIUS: f32 = 2.0;

/// Number of constant-buffer slots; one per drawable, never shared, so the
/// CPU writing one object's record can never collide with the GPU reading
/// another's.
pub const DRAW_SLOT_COUNT: usize = 2;

/// One object in the scene.
#[derive(Clone, Copy, Debug)]
pub struct Drawable {
    /// Index of the constant-buffer slot this drawable exclusively owns.
    pub constant_slot: usize,
    /// Offset along the orbit, degrees.
    pub orbit_phase: f32,
    /// Whether this drawable's record carries the palette light color.
    /// Only one drawable does; the other keeps the white default.
    pub palette_light: bool,
}

impl Drawable {
    /// Model transform at `frame_count`: a point on the orbit, one degree of
    /// arc per frame.
    pub fn model_matrix(&self, frame_count: u64) -> Mat4 {
        let angle = (frame_count as f32 + self.orbit_phase).to_radians();
        Mat4::from_translation(Vec3::new(
            ORBIT_RADIUS * angle.cos(),
            0.0,
            ORBIT_RADIUS * angle.sin(),
        ))
    }
}

/// The scene's two cubes, opposite each other on the orbit.
pub fn scene_drawables() -> [Drawable; DRAW_SLOT_COUNT] {
    [
        Drawable {
            constant_slot: 0,
            orbit_phase: 180.0,
            palette_light: false,
        },
        Drawable {
            constant_slot: 1,
            orbit_phase: 0.0,
            palette_light: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_math::Vec3;

    fn translation(m: Mat4) -> Vec3 {
        m.transform_point3(Vec3::ZERO)
    }

    #[test]
    fn drawables_sit_on_the_orbit() {
        for drawable in scene_drawables() {
            for frame in [0, 17, 60, 359, 720] {
                let p = translation(drawable.model_matrix(frame));
                assert!((p.length() - ORBIT_RADIUS).abs() < 1e-4);
                assert_eq!(p.y, 0.0);
            }
        }
    }

    #[test]
    fn cubes_stay_in_opposition() {
        let [a, b] = scene_drawables();
        for frame in [0, 45, 100] {
            let pa = translation(a.model_matrix(frame));
            let pb = translation(b.model_matrix(frame));
            assert!((pa + pb).length() < 1e-4, "not opposed at frame {frame}");
        }
    }

    #[test]
    fn one_degree_of_arc_per_frame() {
        let [_, b] = scene_drawables();
        let p0 = translation(b.model_matrix(0));
        let p90 = translation(b.model_matrix(90));
        assert!((p0 - Vec3::new(ORBIT_RADIUS, 0.0, 0.0)).length() < 1e-4);
        assert!((p90 - Vec3::new(0.0, 0.0, ORBIT_RADIUS)).length() < 1e-4);
    }

    #[test]
    fn constant_slots_are_exclusive() {
        let drawables = scene_drawables();
        for (i, d) in drawables.iter().enumerate() {
            assert_eq!(d.constant_slot, i);
        }
    }
}
