use crate::pose::Mode;
use crate::profile::MotionProfile;
use crate::shading::ShadeMode;
use crate::state::AppState;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Motion profile selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    /// Legs oscillate within +-0.5, thigh clamped at 0.3 with an amplified kick
    ClampedKick,
    /// Legs oscillate freely within +-0.3
    FreeKick,
}

impl From<ProfileArg> for MotionProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::ClampedKick => MotionProfile::CLAMPED_KICK,
            ProfileArg::FreeKick => MotionProfile::FREE_KICK,
        }
    }
}

/// Shading mode selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShadeArg {
    None,
    Gouraud,
    Phong,
}

impl From<ShadeArg> for ShadeMode {
    fn from(arg: ShadeArg) -> Self {
        match arg {
            ShadeArg::None => ShadeMode::NoLight,
            ShadeArg::Gouraud => ShadeMode::Gouraud,
            ShadeArg::Phong => ShadeMode::Phong,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "blockhuman")]
#[command(about = "Block human swimming demo rendered in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Motion profile driving the leg kick
    #[arg(long, value_enum, default_value_t = ProfileArg::ClampedKick)]
    pub profile: ProfileArg,

    /// Start in the swimming animation instead of the standing pose
    #[arg(long)]
    pub swimming: bool,

    /// Initial shading mode
    #[arg(long, value_enum, default_value_t = ShadeArg::None)]
    pub shade: ShadeArg,

    /// Start with textures enabled
    #[arg(long)]
    pub textured: bool,

    /// Start in wireframe mode
    #[arg(long)]
    pub wireframe: bool,

    /// Directory holding brick.bmp, water.bmp, marble.bmp and tile.bmp
    #[arg(long, value_name = "DIR")]
    pub texture_dir: Option<PathBuf>,

    /// Exit after rendering this many frames
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,

    /// Show the debug overlay
    #[arg(long)]
    pub debug: bool,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Log level requested by `-v`/`-q`, if any
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        match (self.verbose, self.quiet) {
            (0, false) => None,
            (0, true) => Some(log::LevelFilter::Error),
            (1, _) => Some(log::LevelFilter::Info),
            (2, _) => Some(log::LevelFilter::Debug),
            _ => Some(log::LevelFilter::Trace),
        }
    }

    pub fn initial_state(&self) -> AppState {
        AppState {
            mode: if self.swimming {
                Mode::Swimming
            } else {
                Mode::Standing
            },
            shade_mode: self.shade.into(),
            textured: self.textured,
            wireframe: self.wireframe,
            debug: self.debug,
            profile: self.profile.into(),
            ..AppState::default()
        }
    }
}
