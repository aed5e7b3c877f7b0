//! Static cube geometry shared by every drawable.
//!
//! One unit cube, four vertices per face so each face carries its own normal
//! and texture coordinates. The arrays are uploaded once at startup and never
//! touched again.

use bytemuck::{Pod, Zeroable};

/// Vertex layout: position, texture coordinate, normal. Matches the
/// POSITION / TEXCOORD / NORMAL input layout of the pipeline state.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
    pub normal: [f32; 3],
}

const fn vertex(
    px: f32,
    py: f32,
    pz: f32,
    u: f32,
    v: f32,
    nx: f32,
    ny: f32,
    nz: f32,
) -> Vertex {
    Vertex {
        position: [px, py, pz],
        tex_coord: [u, v],
        normal: [nx, ny, nz],
    }
}

/// 24 vertices, one quad per face.
pub const CUBE_VERTICES: [Vertex; 24] = [
    // front
    vertex(-0.5, -0.5, -0.5, 0.0, 1.0, 0.0, 0.0, -1.0),
    vertex(-0.5, 0.5, -0.5, 0.0, 0.0, 0.0, 0.0, -1.0),
    vertex(0.5, 0.5, -0.5, 1.0, 0.0, 0.0, 0.0, -1.0),
    vertex(0.5, -0.5, -0.5, 1.0, 1.0, 0.0, 0.0, -1.0),
    // back
    vertex(-0.5, -0.5, 0.5, 1.0, 1.0, 0.0, 0.0, 1.0),
    vertex(0.5, -0.5, 0.5, 0.0, 1.0, 0.0, 0.0, 1.0),
    vertex(0.5, 0.5, 0.5, 0.0, 0.0, 0.0, 0.0, 1.0),
    vertex(-0.5, 0.5, 0.5, 1.0, 0.0, 0.0, 0.0, 1.0),
    // top
    vertex(-0.5, 0.5, -0.5, 0.0, 1.0, 0.0, 1.0, 0.0),
    vertex(-0.5, 0.5, 0.5, 0.0, 0.0, 0.0, 1.0, 0.0),
    vertex(0.5, 0.5, 0.5, 1.0, 0.0, 0.0, 1.0, 0.0),
    vertex(0.5, 0.5, -0.5, 1.0, 1.0, 0.0, 1.0, 0.0),
    // bottom
    vertex(-0.5, -0.5, -0.5, 1.0, 1.0, 0.0, -1.0, 0.0),
    vertex(0.5, -0.5, -0.5, 0.0, 1.0, 0.0, -1.0, 0.0),
    vertex(0.5, -0.5, 0.5, 0.0, 0.0, 0.0, -1.0, 0.0),
    vertex(-0.5, -0.5, 0.5, 1.0, 0.0, 0.0, -1.0, 0.0),
    // left
    vertex(-0.5, -0.5, 0.5, 0.0, 1.0, -1.0, 0.0, 0.0),
    vertex(-0.5, 0.5, 0.5, 0.0, 0.0, -1.0, 0.0, 0.0),
    vertex(-0.5, 0.5, -0.5, 1.0, 0.0, -1.0, 0.0, 0.0),
    vertex(-0.5, -0.5, -0.5, 1.0, 1.0, -1.0, 0.0, 0.0),
    // right
    vertex(0.5, -0.5, -0.5, 0.0, 1.0, 1.0, 0.0, 0.0),
    vertex(0.5, 0.5, -0.5, 0.0, 0.0, 1.0, 0.0, 0.0),
    vertex(0.5, 0.5, 0.5, 1.0, 0.0, 1.0, 0.0, 0.0),
    vertex(0.5, -0.5, 0.5, 1.0, 1.0, 1.0, 0.0, 0.0),
];

/// 36 indices, two triangles per face.
pub const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, 0, 2, 3, // front
    4, 5, 6, 4, 6, 7, // back
    8, 9, 10, 8, 10, 11, // top
    12, 13, 14, 12, 14, 15, // bottom
    16, 17, 18, 16, 18, 19, // left
    20, 21, 22, 20, 22, 23, // right
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        assert_eq!(CUBE_VERTICES.len(), 24);
        assert_eq!(CUBE_INDICES.len(), 36);
    }

    #[test]
    fn indices_stay_in_range() {
        assert!(CUBE_INDICES.iter().all(|&i| (i as usize) < CUBE_VERTICES.len()));
    }

    #[test]
    fn normals_are_unit_axis_vectors() {
        for v in &CUBE_VERTICES {
            let [nx, ny, nz] = v.normal;
            let length = (nx * nx + ny * ny + nz * nz).sqrt();
            assert!((length - 1.0).abs() < 1e-6);
            assert_eq!(nx.abs() + ny.abs() + nz.abs(), 1.0);
        }
    }

    #[test]
    fn every_face_is_planar_on_its_normal() {
        for quad in CUBE_VERTICES.chunks(4) {
            let n = quad[0].normal;
            // All four corners of a face project to the same extent (0.5)
            // along the face normal.
            for v in quad {
                let d = v.position[0] * n[0] + v.position[1] * n[1] + v.position[2] * n[2];
                assert!((d - 0.5).abs() < 1e-6);
                assert_eq!(v.normal, n);
            }
        }
    }
}
