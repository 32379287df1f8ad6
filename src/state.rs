use crate::animation::AnimationState;
use crate::graphics::RenderOptions;
use crate::pose::Mode;
use crate::profile::MotionProfile;
use crate::shading::ShadeMode;

/// Whether the frame loop keeps going after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Application state
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Standing pose or swimming cycle
    pub mode: Mode,
    pub shade_mode: ShadeMode,
    /// Limbs are drawn with their textures
    pub textured: bool,
    /// Wireframe mode enabled
    pub wireframe: bool,
    /// Enable debug mode
    pub debug: bool,
    /// Simulation paused
    pub paused: bool,
    pub profile: MotionProfile,
    /// Current phase angles
    pub animation: AnimationState,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            mode: Mode::default(),
            shade_mode: ShadeMode::default(),
            textured: false,
            wireframe: false,
            debug: false,
            paused: false,
            profile: MotionProfile::default(),
            animation: AnimationState::INITIAL,
        }
    }
}

impl AppState {
    /// Applies a key press.
    pub fn handle_key(&mut self, key: char) -> Control {
        match key.to_ascii_lowercase() {
            'h' => {
                self.mode = self.mode.toggled();
                log::debug!("Mode: {}", self.mode.label());
            }
            'l' => {
                self.shade_mode = self.shade_mode.next();
                log::debug!("Shading: {}", self.shade_mode.label());
            }
            't' => self.textured = !self.textured,
            'w' => self.wireframe = !self.wireframe,
            'p' => self.paused = !self.paused,
            'd' => self.debug = !self.debug,
            'r' => self.animation = AnimationState::INITIAL,
            'q' => return Control::Quit,
            _ => {}
        }
        Control::Continue
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            shade_mode: self.shade_mode,
            textured: self.textured,
            wireframe: self.wireframe,
        }
    }
}
