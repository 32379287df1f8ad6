use crate::camera::{Camera, DrawCommand};
use crate::math::edge_function;
use crate::mesh::{Mesh, CORNERS, EDGES};
use crate::shading::{Light, ShadeMode};
use crate::texture::{Texture, TextureSet};
use crate::vertex::{MeshVertex, Vertex};
use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

/// Vertices closer to the eye plane than this are not drawn
const MIN_CLIP_W: f32 = 1e-4;

const WIREFRAME_COLOR: Vec3 = Vec3::ONE;

/// Color and depth buffers
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Vec3>,
    depth: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer {
            width,
            height,
            pixels: vec![Vec3::ZERO; width * height],
            depth: vec![f32::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Vec3::ZERO);
        self.depth.fill(f32::INFINITY);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Vec3 {
        self.pixels[y * self.width + x]
    }

    pub fn depth(&self, x: usize, y: usize) -> f32 {
        self.depth[y * self.width + x]
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Vec3) {
        self.pixels[y * self.width + x] = color;
    }

    fn set_fragment(&mut self, x: usize, y: usize, depth: f32, color: Vec3) {
        let offset = y * self.width + x;
        self.depth[offset] = depth;
        self.pixels[offset] = color;
    }

    /// Maps normalized device coordinates to pixel coordinates (y down).
    pub fn to_screen(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc.y) * 0.5 * self.height as f32,
        )
    }
}

/// Per-fragment shading inputs shared by one triangle
pub struct FragmentShader<'a> {
    pub mode: ShadeMode,
    pub light: &'a Light,
    /// Base color sampler; `None` uses the interpolated vertex color
    pub texture: Option<&'a Texture>,
}

impl FragmentShader<'_> {
    fn shade(&self, weights: Vec3, v0: &Vertex, v1: &Vertex, v2: &Vertex) -> Vec3 {
        let lerp3 = |a: Vec3, b: Vec3, c: Vec3| a * weights.x + b * weights.y + c * weights.z;
        let base = match self.texture {
            Some(texture) => {
                let uv = v0.uv * weights.x + v1.uv * weights.y + v2.uv * weights.z;
                texture.sample(uv)
            }
            None => lerp3(v0.color, v1.color, v2.color),
        };
        let position = lerp3(v0.position, v1.position, v2.position);
        let normal = lerp3(v0.normal, v1.normal, v2.normal);
        let intensity =
            v0.intensity * weights.x + v1.intensity * weights.y + v2.intensity * weights.z;
        self.light.shade(self.mode, base, normal, position, intensity)
    }
}

/// Draws a depth-tested triangle, accepting either winding
pub fn draw_triangle(
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    frame: &mut Framebuffer,
    shader: &FragmentShader<'_>,
) {
    if frame.width == 0 || frame.height == 0 {
        return;
    }

    let (a, b, c) = (v0.screen_position, v1.screen_position, v2.screen_position);

    // Compute bounding box of the triangle
    let min = a.min(b).min(c);
    let max = a.max(b).max(c);
    if max.x < 0.0 || max.y < 0.0 || min.x >= frame.width as f32 || min.y >= frame.height as f32 {
        return;
    }
    let min_x = min.x.floor().max(0.0) as usize;
    let min_y = min.y.floor().max(0.0) as usize;
    let max_x = (max.x.ceil() as usize).min(frame.width - 1);
    let max_y = (max.y.ceil() as usize).min(frame.height - 1);

    // Precompute area of the triangle; its sign carries the winding
    let area = edge_function(a, b, c);
    if area.abs() < f32::EPSILON {
        return;
    }

    // For each pixel in the bounding box
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            // Normalized barycentric coordinates
            let weights =
                Vec3::new(edge_function(b, c, p), edge_function(c, a, p), edge_function(a, b, p))
                    / area;
            if weights.min_element() < 0.0 {
                continue;
            }

            // Depth test
            let depth = v0.depth * weights.x + v1.depth * weights.y + v2.depth * weights.z;
            if depth < frame.depth(x, y) {
                let color = shader.shade(weights, v0, v1, v2);
                frame.set_fragment(x, y, depth, color);
            }
        }
    }
}

/// Liang-Barsky clip of a segment to the pixel rectangle of `frame`
fn clip_to_frame(from: Vec2, to: Vec2, frame: &Framebuffer) -> Option<(Vec2, Vec2)> {
    if !from.is_finite() || !to.is_finite() || frame.width == 0 || frame.height == 0 {
        return None;
    }
    let max = Vec2::new(frame.width as f32 - 1.0, frame.height as f32 - 1.0);
    let delta = to - from;
    let (mut t0, mut t1) = (0.0_f32, 1.0_f32);
    for (p, q) in [
        (-delta.x, from.x),
        (delta.x, max.x - from.x),
        (-delta.y, from.y),
        (delta.y, max.y - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
        }
    }
    (t0 <= t1).then(|| (from + delta * t0, from + delta * t1))
}

/// Draws a line between two points in the pixel buffer using Bresenham's algorithm
pub fn draw_line(from: Vec2, to: Vec2, frame: &mut Framebuffer, color: Vec3) {
    let Some((from, to)) = clip_to_frame(from, to, frame) else {
        return;
    };
    let (mut x0, mut y0, x1, y1) = (
        from.x.round() as isize,
        from.y.round() as isize,
        to.x.round() as isize,
        to.y.round() as isize,
    );
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy; // error value e_xy

    loop {
        if x0 >= 0 && x0 < frame.width as isize && y0 >= 0 && y0 < frame.height as isize {
            frame.set_pixel(x0 as usize, y0 as usize, color);
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Projects a point to screen space, or `None` when it lies behind the eye.
fn project(mvp: Mat4, position: Vec3, frame: &Framebuffer) -> Option<(Vec2, f32)> {
    let clip: Vec4 = mvp * position.extend(1.0);
    if clip.w <= MIN_CLIP_W {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some((frame.to_screen(ndc.truncate()), ndc.z))
}

fn transform_vertex(
    vertex: &MeshVertex,
    command: &DrawCommand,
    normal_matrix: Mat3,
    light: &Light,
    frame: &Framebuffer,
) -> Option<Vertex> {
    let (screen_position, depth) = project(command.mvp, vertex.position, frame)?;
    let position = command.model.transform_point3(vertex.position);
    let normal = (normal_matrix * vertex.normal).normalize_or_zero();
    Some(Vertex {
        position,
        screen_position,
        depth,
        normal,
        color: vertex.color,
        uv: vertex.uv,
        intensity: light.intensity(normal, position),
    })
}

/// Rendering switches for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub shade_mode: ShadeMode,
    pub textured: bool,
    pub wireframe: bool,
}

/// Draws every command of a display list into `frame`.
pub fn draw_scene(
    frame: &mut Framebuffer,
    mesh: &Mesh,
    camera: &Camera,
    commands: &[DrawCommand],
    textures: &TextureSet,
    options: RenderOptions,
) {
    let light = Light::headlight(camera.eye());
    for command in commands {
        if options.wireframe {
            draw_wireframe(frame, command);
            continue;
        }

        let normal_matrix = Mat3::from_mat4(command.model).inverse().transpose();
        let shader = FragmentShader {
            mode: options.shade_mode,
            light: &light,
            texture: options.textured.then(|| textures.get(command.texture)),
        };
        for triangle in mesh.triangles() {
            let transformed: Option<Vec<Vertex>> = triangle
                .iter()
                .map(|vertex| transform_vertex(vertex, command, normal_matrix, &light, &*frame))
                .collect();
            if let Some(v) = transformed {
                draw_triangle(&v[0], &v[1], &v[2], frame, &shader);
            }
        }
    }
}

fn draw_wireframe(frame: &mut Framebuffer, command: &DrawCommand) {
    let projected: Vec<Option<Vec2>> = CORNERS
        .iter()
        .map(|&corner| project(command.mvp, corner, &*frame).map(|(screen, _)| screen))
        .collect();
    for &(start, end) in EDGES.iter() {
        if let (Some(from), Some(to)) = (projected[start], projected[end]) {
            draw_line(from, to, frame, WIREFRAME_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationState;
    use crate::pose::{evaluate, Mode};
    use crate::profile::MotionProfile;

    fn flat_vertex(x: f32, y: f32, depth: f32, color: Vec3) -> Vertex {
        Vertex {
            position: Vec3::ZERO,
            screen_position: Vec2::new(x, y),
            depth,
            normal: Vec3::Z,
            color,
            uv: Vec2::ZERO,
            intensity: 1.0,
        }
    }

    fn unlit<'a>(light: &'a Light) -> FragmentShader<'a> {
        FragmentShader {
            mode: ShadeMode::NoLight,
            light,
            texture: None,
        }
    }

    #[test]
    fn triangle_fills_interior_only() {
        let light = Light::headlight(Vec3::Z);
        let mut frame = Framebuffer::new(8, 8);
        let red = Vec3::X;
        draw_triangle(
            &flat_vertex(0.0, 0.0, 0.5, red),
            &flat_vertex(8.0, 0.0, 0.5, red),
            &flat_vertex(0.0, 8.0, 0.5, red),
            &mut frame,
            &unlit(&light),
        );
        assert_eq!(frame.pixel(1, 1), red);
        assert_eq!(frame.pixel(7, 7), Vec3::ZERO);
        assert_eq!(frame.depth(1, 1), 0.5);
    }

    #[test]
    fn nearer_triangle_wins_depth_test() {
        let light = Light::headlight(Vec3::Z);
        let mut frame = Framebuffer::new(4, 4);
        let quad = |depth: f32, color: Vec3, frame: &mut Framebuffer| {
            // Opposite windings on purpose.
            draw_triangle(
                &flat_vertex(0.0, 0.0, depth, color),
                &flat_vertex(4.0, 0.0, depth, color),
                &flat_vertex(0.0, 4.0, depth, color),
                frame,
                &unlit(&light),
            );
            draw_triangle(
                &flat_vertex(4.0, 0.0, depth, color),
                &flat_vertex(4.0, 4.0, depth, color),
                &flat_vertex(0.0, 4.0, depth, color),
                frame,
                &unlit(&light),
            );
        };
        quad(0.2, Vec3::Y, &mut frame);
        quad(0.6, Vec3::X, &mut frame);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(frame.pixel(x, y), Vec3::Y, "pixel {x},{y}");
            }
        }
    }

    #[test]
    fn offscreen_triangle_is_ignored() {
        let light = Light::headlight(Vec3::Z);
        let mut frame = Framebuffer::new(4, 4);
        draw_triangle(
            &flat_vertex(-10.0, -10.0, 0.1, Vec3::ONE),
            &flat_vertex(-5.0, -10.0, 0.1, Vec3::ONE),
            &flat_vertex(-10.0, -5.0, 0.1, Vec3::ONE),
            &mut frame,
            &unlit(&light),
        );
        assert_eq!(frame, Framebuffer::new(4, 4));
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut frame = Framebuffer::new(5, 5);
        draw_line(Vec2::new(0.0, 0.0), Vec2::new(4.0, 2.0), &mut frame, Vec3::ONE);
        assert_eq!(frame.pixel(0, 0), Vec3::ONE);
        assert_eq!(frame.pixel(4, 2), Vec3::ONE);
        assert_eq!(frame.pixel(0, 4), Vec3::ZERO);
    }

    #[test]
    fn line_is_clipped_to_the_frame() {
        let mut frame = Framebuffer::new(4, 4);
        draw_line(Vec2::new(0.0, 1.0), Vec2::new(2.0e8, 1.0), &mut frame, Vec3::ONE);
        for x in 0..4 {
            assert_eq!(frame.pixel(x, 1), Vec3::ONE, "pixel {x},1");
        }
        assert_eq!(frame.pixel(0, 0), Vec3::ZERO);

        let mut untouched = Framebuffer::new(4, 4);
        draw_line(Vec2::new(-5.0, -5.0), Vec2::new(-1.0e8, 3.0), &mut untouched, Vec3::ONE);
        draw_line(Vec2::new(f32::NAN, 0.0), Vec2::new(2.0, 2.0), &mut untouched, Vec3::ONE);
        assert_eq!(untouched, Framebuffer::new(4, 4));
    }

    #[test]
    fn scene_draws_figure_near_centre() {
        let profile = MotionProfile::default();
        for mode in [Mode::Standing, Mode::Swimming] {
            for shade_mode in ShadeMode::ALL {
                for textured in [false, true] {
                    let mut frame = Framebuffer::new(64, 48);
                    let camera = Camera::for_mode(mode, frame.aspect());
                    let pose = evaluate(&AnimationState::INITIAL, mode, &profile);
                    let commands = camera.draw_list(&pose);
                    let options = RenderOptions {
                        shade_mode,
                        textured,
                        wireframe: false,
                    };
                    draw_scene(
                        &mut frame,
                        &Mesh::cube(),
                        &camera,
                        &commands,
                        &TextureSet::fallback(),
                        options,
                    );
                    let covered = (0..frame.height())
                        .flat_map(|y| (0..frame.width()).map(move |x| (x, y)))
                        .filter(|&(x, y)| frame.depth(x, y).is_finite())
                        .count();
                    assert!(covered > 50, "{mode:?}/{shade_mode:?}: only {covered} pixels");
                    assert!(frame.depth(0, 0).is_infinite());
                }
            }
        }
    }

    #[test]
    fn wireframe_leaves_depth_untouched() {
        let mut frame = Framebuffer::new(64, 48);
        let camera = Camera::for_mode(Mode::Standing, frame.aspect());
        let pose = evaluate(&AnimationState::INITIAL, Mode::Standing, &MotionProfile::default());
        let options = RenderOptions {
            wireframe: true,
            ..RenderOptions::default()
        };
        draw_scene(
            &mut frame,
            &Mesh::cube(),
            &camera,
            &camera.draw_list(&pose),
            &TextureSet::fallback(),
            options,
        );
        let lit = (0..frame.height())
            .flat_map(|y| (0..frame.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| frame.pixel(x, y) == WIREFRAME_COLOR)
            .count();
        assert!(lit > 20);
        assert!(frame.depth(32, 24).is_infinite());
    }
}
