use crate::pose::{Mode, Pose, TextureSlot};
use glam::{Mat4, Vec3};

const FOV_Y_DEGREES: f32 = 65.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

/// Projection and view for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub projection: Mat4,
    pub view: Mat4,
}

impl Camera {
    /// Camera for `mode` with a viewport of the given aspect ratio (width / height).
    pub fn for_mode(mode: Mode, aspect: f32) -> Self {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        Camera {
            projection: Mat4::perspective_rh_gl(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR),
            view: view_for(mode),
        }
    }

    /// World-space position of the eye
    pub fn eye(&self) -> Vec3 {
        self.view.inverse().transform_point3(Vec3::ZERO)
    }

    /// Projection x View x Model
    pub fn mvp(&self, model: Mat4) -> Mat4 {
        self.projection * self.view * model
    }

    /// Builds the display list for one pose.
    pub fn draw_list(&self, pose: &Pose) -> Vec<DrawCommand> {
        pose.iter()
            .map(|entry| DrawCommand {
                model: entry.model,
                mvp: self.mvp(entry.model),
                texture: entry.limb.texture_slot(),
            })
            .collect()
    }
}

fn view_for(mode: Mode) -> Mat4 {
    match mode {
        Mode::Standing => Mat4::look_at_rh(Vec3::new(8.0, -2.0, 7.0), Vec3::ZERO, Vec3::Z),
        Mode::Swimming => {
            Mat4::look_at_rh(Vec3::new(2.0, 10.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::Z)
                * Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2)
        }
    }
}

/// One cube instance to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub model: Mat4,
    pub mvp: Mat4,
    pub texture: TextureSlot,
}
