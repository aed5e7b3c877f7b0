//! The per-draw constant-buffer record.

use bevy_math::{Mat4, Vec3, Vec4};
use bytemuck::{Pod, Zeroable};

/// Size of one constant-buffer slot. Direct3D requires constant-buffer views
/// to start on 256-byte boundaries, so each drawable owns one 256-byte slot
/// and [`SceneConstants`] must fit inside it.
pub const CONSTANT_SLOT_BYTES: u64 = 256;

/// POD record handed to the vertex and pixel shaders for one draw.
///
/// Matrices are stored transposed so the shader's `mul(vector, matrix)`
/// row-vector convention composes correctly against the default cbuffer
/// layout.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneConstants {
    /// transpose(model x view x projection).
    pub world: [f32; 16],
    /// transpose(model), for lighting in world space.
    pub model: [f32; 16],
    /// Point light position, world space (w = 1).
    pub light_position: [f32; 4],
    /// Point light color, linear RGBA.
    pub light_color: [f32; 4],
    /// Camera eye position, world space (w = 1).
    pub eye: [f32; 4],
}

impl SceneConstants {
    /// Assemble the record for one drawable from the frame's matrices.
    pub fn assemble(
        model: Mat4,
        view: Mat4,
        projection: Mat4,
        light_position: Vec4,
        light_color: [f32; 4],
        eye: Vec3,
    ) -> Self {
        let world = projection * view * model;
        Self {
            world: world.transpose().to_cols_array(),
            model: model.transpose().to_cols_array(),
            light_position: light_position.to_array(),
            light_color,
            eye: eye.extend(1.0).to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_fits_one_constant_slot() {
        assert!(std::mem::size_of::<SceneConstants>() as u64 <= CONSTANT_SLOT_BYTES);
    }

    #[test]
    fn identity_matrices_round_trip() {
        let record = SceneConstants::assemble(
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            [1.0; 4],
            Vec3::ZERO,
        );
        assert_eq!(record.world, Mat4::IDENTITY.to_cols_array());
        assert_eq!(record.model, Mat4::IDENTITY.to_cols_array());
        assert_eq!(record.eye, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn world_matrix_is_the_transposed_product() {
        let model = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
        let projection = Mat4::perspective_lh(45.0_f32.to_radians(), 4.0 / 3.0, 0.1, 300.0);
        let record = SceneConstants::assemble(
            model,
            view,
            projection,
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            [1.0; 4],
            Vec3::ZERO,
        );
        let expected = (projection * view * model).transpose().to_cols_array();
        assert_eq!(record.world, expected);
    }
}
