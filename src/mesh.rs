use crate::math::calculate_normal;
use crate::vertex::MeshVertex;
use glam::{Vec2, Vec3};

pub const NUM_VERTICES: usize = 36;

/// Cube corners
pub const CORNERS: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
];

/// Corner colors
pub const CORNER_COLORS: [Vec3; 8] = [
    Vec3::new(0.0, 0.0, 0.0), // Black
    Vec3::new(0.0, 1.0, 1.0), // Cyan
    Vec3::new(1.0, 0.0, 1.0), // Magenta
    Vec3::new(1.0, 1.0, 0.0), // Yellow
    Vec3::new(1.0, 0.0, 0.0), // Red
    Vec3::new(0.0, 1.0, 0.0), // Green
    Vec3::new(0.0, 0.0, 1.0), // Blue
    Vec3::new(1.0, 1.0, 1.0), // White
];

/// Cube faces, outward counter-clockwise (each face is defined by 4 corner indices)
pub const FACES: [(usize, usize, usize, usize); 6] = [
    (1, 0, 3, 2),
    (2, 3, 7, 6),
    (3, 0, 4, 7),
    (6, 5, 1, 2),
    (4, 5, 6, 7),
    (5, 4, 0, 1),
];

/// Cube edges (pairs of corner indices)
pub const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0), // Front face
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4), // Back face
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7), // Connecting edges
];

/// Texture coordinates of a face's corners, in face order `a, b, c, d`
const FACE_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, 0.0),
];

/// Triangle 1: a, b, c. Triangle 2: a, c, d.
const QUAD_TRIANGLES: [usize; 6] = [0, 1, 2, 0, 2, 3];

/// Triangle list for the cube: 6 faces, 2 triangles each.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: [MeshVertex; NUM_VERTICES],
}

impl Mesh {
    pub fn cube() -> Self {
        // Average the face normals at every corner, as for a smooth-shaded cube.
        let mut corner_normals = [Vec3::ZERO; 8];
        for &(a, b, c, d) in FACES.iter() {
            let normal = calculate_normal(CORNERS[a], CORNERS[b], CORNERS[c]);
            for index in [a, b, c, d] {
                corner_normals[index] += normal;
            }
        }
        for normal in corner_normals.iter_mut() {
            *normal = normal.normalize();
        }

        let vertex = |corner: usize, uv: Vec2| MeshVertex {
            position: CORNERS[corner],
            color: CORNER_COLORS[corner],
            normal: corner_normals[corner],
            uv,
        };

        let vertices = std::array::from_fn(|index| {
            let (a, b, c, d) = FACES[index / 6];
            let corner = QUAD_TRIANGLES[index % 6];
            vertex([a, b, c, d][corner], FACE_UVS[corner])
        });
        Mesh { vertices }
    }

    pub fn triangles(&self) -> impl Iterator<Item = &[MeshVertex]> + '_ {
        self.vertices.chunks_exact(3)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::cube()
    }
}
