use glam::{Vec2, Vec3};

/// Minimum light reaching a surface facing away from the light
pub const AMBIENT: f32 = 0.1;

/// Edge function used in rasterization
pub fn edge_function(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (c.x - a.x) * (b.y - a.y) - (c.y - a.y) * (b.x - a.x)
}

/// Calculates the normal vector of a triangle
pub fn calculate_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Calculates the diffuse light intensity based on the normal vector and light position
pub fn calculate_light_intensity(normal: Vec3, position: Vec3, light_pos: Vec3) -> f32 {
    let light_dir = (light_pos - position).normalize_or_zero();
    normal.dot(light_dir).max(AMBIENT)
}

/// Blinn-Phong specular term seen from `eye`
pub fn calculate_specular(
    normal: Vec3,
    position: Vec3,
    light_pos: Vec3,
    eye: Vec3,
    shininess: f32,
) -> f32 {
    let light_dir = (light_pos - position).normalize_or_zero();
    if normal.dot(light_dir) <= 0.0 {
        return 0.0;
    }
    let view_dir = (eye - position).normalize_or_zero();
    let half = (light_dir + view_dir).normalize_or_zero();
    normal.dot(half).max(0.0).powf(shininess)
}

/// Applies lighting to a color
pub fn apply_lighting(color: Vec3, intensity: f32) -> Vec3 {
    (color * intensity).min(Vec3::ONE)
}

/// Converts a `[0, 1]` color to 8-bit channels
pub fn to_rgb8(color: Vec3) -> [u8; 3] {
    let c = color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
    [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8]
}
