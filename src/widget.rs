use crate::animation::AnimationClock;
use crate::camera::Camera;
use crate::error::Result;
use crate::graphics::{draw_scene, Framebuffer};
use crate::mesh::Mesh;
use crate::pose::evaluate;
use crate::state::{AppState, Control};
use crate::terminal::{framebuffer_size, Input, TerminalSession};
use crate::texture::TextureSet;
use std::time::{Duration, Instant};

/// Target time between frames
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

const PAUSED_BANNER: &str = " Paused ";

/// Block human renderer
pub struct HumanWidget {
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
    clock: AnimationClock,
    mesh: Mesh,
    textures: TextureSet,
    frame: Framebuffer,
}

impl HumanWidget {
    /// Creates a widget filling a terminal of `cols` x `rows` cells.
    pub fn new(textures: TextureSet, (cols, rows): (u16, u16), now: Instant) -> Self {
        let (width, height) = framebuffer_size(cols, rows);
        HumanWidget {
            frames_since_last_update: 0,
            last_fps_calculation: now,
            fps: 0.0,
            clock: AnimationClock::new(now),
            mesh: Mesh::cube(),
            textures,
            frame: Framebuffer::new(width, height),
        }
    }

    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        let (width, height) = framebuffer_size(cols, rows);
        log::debug!("Resizing framebuffer to {width}x{height}");
        self.frame = Framebuffer::new(width, height);
    }

    /// Advances the animation, or holds it while paused.
    pub fn update(&mut self, data: &mut AppState, now: Instant) {
        if data.paused {
            self.clock.resume(now);
            return;
        }
        data.animation = self.clock.tick(now, data.animation, &data.profile);
        log::trace!("Animation state: {:?}", data.animation);
    }

    /// Renders the current pose into the framebuffer
    pub fn paint(&mut self, data: &AppState, now: Instant) {
        // Update FPS calculation
        self.frames_since_last_update += 1;
        let duration = now.saturating_duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }

        let pose = evaluate(&data.animation, data.mode, &data.profile);
        let camera = Camera::for_mode(data.mode, self.frame.aspect());
        let commands = camera.draw_list(&pose);
        self.frame.clear();
        draw_scene(
            &mut self.frame,
            &self.mesh,
            &camera,
            &commands,
            &self.textures,
            data.render_options(),
        );
    }

    /// Debug overlay lines, empty unless debug mode is on
    pub fn overlay(&self, data: &AppState) -> Vec<String> {
        if !data.debug {
            return Vec::new();
        }
        vec![
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            format!("Mode: {}", data.mode.label()),
            format!("Shading: {}", data.shade_mode.label()),
            format!(
                "Texture: {}, Wireframe: {}",
                if data.textured { "on" } else { "off" },
                if data.wireframe { "on" } else { "off" }
            ),
            format!("Profile: {}", data.profile.name),
            format!(
                "Arms: {:.2} / {:.2}, Leg: {:.2}",
                data.animation.left_arm, data.animation.right_arm, data.animation.leg
            ),
            format!("FPS: {:.2}", self.fps),
        ]
    }

    /// Applies one input event.
    pub fn event(&mut self, input: Input, data: &mut AppState) -> Control {
        match input {
            Input::Key(key) => data.handle_key(key),
            Input::Quit => Control::Quit,
            Input::Resize(cols, rows) => {
                self.resize(cols, rows);
                Control::Continue
            }
            Input::Other => Control::Continue,
        }
    }

    /// Runs the frame loop until quit, or until `max_frames` frames were shown.
    ///
    /// Returns the number of frames presented.
    pub fn run(
        &mut self,
        session: &mut TerminalSession,
        data: &mut AppState,
        max_frames: Option<u64>,
    ) -> Result<u64> {
        let mut frames = 0;
        loop {
            let frame_start = Instant::now();
            self.update(data, frame_start);
            self.paint(data, frame_start);
            let banner = data.paused.then_some(PAUSED_BANNER);
            session.present(&self.frame, &self.overlay(data), banner)?;
            frames += 1;
            if max_frames.is_some_and(|max| frames >= max) {
                return Ok(frames);
            }

            let deadline = frame_start + FRAME_INTERVAL;
            while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
                let Some(input) = session.poll_input(remaining)? else {
                    break;
                };
                if self.event(input, data) == Control::Quit {
                    return Ok(frames);
                }
            }
        }
    }
}
