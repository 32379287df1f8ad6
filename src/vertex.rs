use glam::{Vec2, Vec3};

/// Vertex of the shared cube mesh, in model space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub color: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Vertex structure after transformation, ready for rasterization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// World-space position, used for lighting
    pub position: Vec3,
    pub screen_position: Vec2,
    /// Normalized device depth, smaller is closer
    pub depth: f32,
    /// World-space normal
    pub normal: Vec3,
    pub color: Vec3,
    pub uv: Vec2,
    /// Light intensity evaluated at the vertex (Gouraud shading)
    pub intensity: f32,
}
