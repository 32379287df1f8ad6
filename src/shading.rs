use crate::math::{apply_lighting, calculate_light_intensity, calculate_specular};
use glam::Vec3;

const SHININESS: f32 = 24.0;
const SPECULAR_STRENGTH: f32 = 0.35;

/// How a fragment's base color is lit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadeMode {
    /// Base color only
    #[default]
    NoLight,
    /// Lighting evaluated per vertex and interpolated
    Gouraud,
    /// Lighting evaluated per pixel
    Phong,
}

impl ShadeMode {
    pub const ALL: [ShadeMode; 3] = [ShadeMode::NoLight, ShadeMode::Gouraud, ShadeMode::Phong];

    /// Next mode in the NoLight -> Gouraud -> Phong cycle
    pub fn next(self) -> ShadeMode {
        match self {
            ShadeMode::NoLight => ShadeMode::Gouraud,
            ShadeMode::Gouraud => ShadeMode::Phong,
            ShadeMode::Phong => ShadeMode::NoLight,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShadeMode::NoLight => "no light",
            ShadeMode::Gouraud => "gouraud",
            ShadeMode::Phong => "phong",
        }
    }
}

/// Point light that also serves as the viewer position for highlights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub eye: Vec3,
}

impl Light {
    /// A light sitting on the camera
    pub fn headlight(eye: Vec3) -> Self {
        Light { position: eye, eye }
    }

    /// Combined diffuse and specular intensity at a surface point
    pub fn intensity(&self, normal: Vec3, position: Vec3) -> f32 {
        let diffuse = calculate_light_intensity(normal, position, self.position);
        let specular = calculate_specular(normal, position, self.position, self.eye, SHININESS);
        diffuse + SPECULAR_STRENGTH * specular
    }

    /// Final fragment color for `mode`.
    ///
    /// `vertex_intensity` is the interpolated per-vertex intensity, used by Gouraud.
    pub fn shade(
        &self,
        mode: ShadeMode,
        base: Vec3,
        normal: Vec3,
        position: Vec3,
        vertex_intensity: f32,
    ) -> Vec3 {
        match mode {
            ShadeMode::NoLight => base,
            ShadeMode::Gouraud => apply_lighting(base, vertex_intensity),
            ShadeMode::Phong => {
                apply_lighting(base, self.intensity(normal.normalize_or_zero(), position))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::AMBIENT;

    #[test]
    fn shade_mode_cycles_through_all_modes() {
        let mut mode = ShadeMode::default();
        let mut seen = Vec::new();
        for _ in 0..ShadeMode::ALL.len() {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(seen, ShadeMode::ALL.to_vec());
        assert_eq!(mode, ShadeMode::NoLight);
    }

    #[test]
    fn no_light_passes_base_color_through() {
        let light = Light::headlight(Vec3::new(0.0, 0.0, 5.0));
        let base = Vec3::new(0.2, 0.4, 0.6);
        let shaded = light.shade(ShadeMode::NoLight, base, -Vec3::Z, Vec3::ZERO, 0.0);
        assert_eq!(shaded, base);
    }

    #[test]
    fn phong_darkens_faces_turned_away() {
        let light = Light::headlight(Vec3::new(0.0, 0.0, 5.0));
        let base = Vec3::ONE;
        let facing = light.shade(ShadeMode::Phong, base, Vec3::Z, Vec3::ZERO, 0.0);
        let away = light.shade(ShadeMode::Phong, base, -Vec3::Z, Vec3::ZERO, 0.0);
        assert_eq!(facing, Vec3::ONE);
        assert!(away.abs_diff_eq(Vec3::splat(AMBIENT), 1e-6));
    }

    #[test]
    fn gouraud_uses_interpolated_intensity() {
        let light = Light::headlight(Vec3::new(0.0, 0.0, 5.0));
        let shaded = light.shade(ShadeMode::Gouraud, Vec3::ONE, Vec3::Z, Vec3::ZERO, 0.5);
        assert_eq!(shaded, Vec3::splat(0.5));
    }
}
