//! Block human swimming demo.
//!
//! A figure built from ten scaled cubes either stands still or swims a
//! front-crawl cycle. The pose is computed from three phase angles that a
//! fixed-step clock advances, then rasterized in software and shown in the
//! terminal.

pub mod animation;
pub mod camera;
pub mod config;
pub mod error;
pub mod graphics;
pub mod math;
pub mod mesh;
pub mod pose;
pub mod profile;
pub mod shading;
pub mod state;
pub mod terminal;
pub mod texture;
pub mod vertex;
pub mod widget;

pub use animation::{advance, AnimationClock, AnimationState};
pub use error::{Error, Result};
pub use pose::{evaluate, Limb, LimbPose, Mode, Pose};
pub use profile::MotionProfile;
