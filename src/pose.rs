use crate::animation::AnimationState;
use crate::profile::{KickShape, MotionProfile, StrokeCurve};
use glam::{Mat4, Vec3};

/// Animation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Fixed standing pose
    #[default]
    Standing,
    /// Animated swimming cycle
    Swimming,
}

impl Mode {
    pub fn toggled(self) -> Mode {
        match self {
            Mode::Standing => Mode::Swimming,
            Mode::Swimming => Mode::Standing,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Standing => "standing",
            Mode::Swimming => "swimming",
        }
    }
}

/// Body segments, in draw order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limb {
    Head,
    Body,
    LeftForearm,
    LeftUpperArm,
    RightForearm,
    RightUpperArm,
    LeftUpperLeg,
    LeftLowerLeg,
    RightUpperLeg,
    RightLowerLeg,
}

impl Limb {
    pub const ALL: [Limb; 10] = [
        Limb::Head,
        Limb::Body,
        Limb::LeftForearm,
        Limb::LeftUpperArm,
        Limb::RightForearm,
        Limb::RightUpperArm,
        Limb::LeftUpperLeg,
        Limb::LeftLowerLeg,
        Limb::RightUpperLeg,
        Limb::RightLowerLeg,
    ];

    pub fn texture_slot(self) -> TextureSlot {
        match self {
            Limb::Head => TextureSlot::Head,
            Limb::Body => TextureSlot::Body,
            Limb::LeftForearm | Limb::LeftUpperArm | Limb::RightForearm | Limb::RightUpperArm => {
                TextureSlot::Arm
            }
            Limb::LeftUpperLeg | Limb::LeftLowerLeg | Limb::RightUpperLeg | Limb::RightLowerLeg => {
                TextureSlot::Leg
            }
        }
    }
}

/// Texture bound while a limb is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Head,
    Body,
    Arm,
    Leg,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 4] = [
        TextureSlot::Head,
        TextureSlot::Body,
        TextureSlot::Arm,
        TextureSlot::Leg,
    ];
}

/// Static template for one limb: translate, then rotate about X, then Y, then scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbSpec {
    pub limb: Limb,
    pub offset: Vec3,
    pub tilt_x: f32,
    pub turn_y: f32,
    pub scale: Vec3,
}

impl LimbSpec {
    const fn new(limb: Limb, offset: Vec3, tilt_x: f32, turn_y: f32, scale: Vec3) -> Self {
        LimbSpec {
            limb,
            offset,
            tilt_x,
            turn_y,
            scale,
        }
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.offset)
            * Mat4::from_rotation_x(self.tilt_x)
            * Mat4::from_rotation_y(self.turn_y)
            * Mat4::from_scale(self.scale)
    }
}

const HEAD_SCALE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
const BODY_SCALE: Vec3 = Vec3::new(1.0, 2.0, 3.0);
const HEAD_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 4.0);
const BODY_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 2.0);

/// The standing pose
pub const STANDING: [LimbSpec; 10] = [
    LimbSpec::new(Limb::Head, HEAD_OFFSET, 0.0, 0.0, HEAD_SCALE),
    LimbSpec::new(Limb::Body, BODY_OFFSET, 0.0, 0.0, BODY_SCALE),
    LimbSpec::new(
        Limb::LeftForearm,
        Vec3::new(0.0, 1.3, 2.8),
        1.0,
        0.0,
        Vec3::new(0.5, 0.5, 1.5),
    ),
    LimbSpec::new(
        Limb::LeftUpperArm,
        Vec3::new(0.0, 1.3, 2.1),
        -0.8,
        0.0,
        Vec3::new(0.5, 0.5, 1.2),
    ),
    LimbSpec::new(
        Limb::RightForearm,
        Vec3::new(0.0, -1.3, 2.6),
        -0.6,
        -0.2,
        Vec3::new(0.5, 0.5, 1.5),
    ),
    LimbSpec::new(
        Limb::RightUpperArm,
        Vec3::new(0.3, -1.6, 1.7),
        0.3,
        -0.4,
        Vec3::new(0.5, 0.5, 1.2),
    ),
    LimbSpec::new(
        Limb::LeftUpperLeg,
        Vec3::new(0.0, 0.5, -0.2),
        0.0,
        0.0,
        Vec3::new(0.8, 0.8, 1.5),
    ),
    LimbSpec::new(
        Limb::LeftLowerLeg,
        Vec3::new(0.0, 0.5, -1.7),
        0.0,
        0.0,
        Vec3::new(0.8, 0.8, 1.5),
    ),
    LimbSpec::new(
        Limb::RightUpperLeg,
        Vec3::new(0.0, -0.5, -0.2),
        -0.2,
        0.0,
        Vec3::new(0.8, 0.8, 1.5),
    ),
    LimbSpec::new(
        Limb::RightLowerLeg,
        Vec3::new(0.0, -0.6, -1.6),
        0.1,
        0.0,
        Vec3::new(0.8, 0.8, 1.8),
    ),
];

const ARM_SCALE: Vec3 = Vec3::new(0.5, 0.5, 1.2);
const UPPER_LEG_SCALE: Vec3 = Vec3::new(0.8, 0.8, 1.5);
const LOWER_LEG_SCALE: Vec3 = Vec3::new(0.8, 0.8, 1.8);
const SHOULDER_Y: f32 = 1.3;
const FOREARM_Z: f32 = 2.7;
const UPPER_ARM_Z: f32 = 1.5;
const HIP_Y: f32 = 0.5;
const UPPER_LEG_Z: f32 = -0.2;
const LOWER_LEG_Z: f32 = -1.6;

/// One limb's model matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbPose {
    pub limb: Limb,
    pub model: Mat4,
}

/// Model matrices for every limb, in [`Limb::ALL`] order
pub type Pose = [LimbPose; 10];

/// Branch of the upper-arm stroke curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeBranch {
    /// Phase in `[0, reach_end)`
    Reach,
    /// Phase in `[reach_end, sweep_end)`
    Sweep,
    /// Everything else
    Recover,
}

pub fn stroke_branch(phase: f32, stroke: &StrokeCurve) -> StrokeBranch {
    if (0.0..stroke.reach_end).contains(&phase) {
        StrokeBranch::Reach
    } else if (stroke.reach_end..stroke.sweep_end).contains(&phase) {
        StrokeBranch::Sweep
    } else {
        StrokeBranch::Recover
    }
}

/// Branch of the lower-leg kick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickBranch {
    /// Rotation about the near knee pivot by the raw angle
    Plain,
    /// Amplified rotation about the far knee pivot
    Amplified,
}

/// Branch taken by a leg whose signed kick angle is `angle`.
pub fn kick_branch(angle: f32, kick: &KickShape) -> KickBranch {
    match kick.clamp {
        Some(clamp) if angle > clamp => KickBranch::Amplified,
        _ => KickBranch::Plain,
    }
}

/// Rotation about the Y axis through a point `distance` along the limb's Z axis.
fn pivot_rotation(distance: f32, angle: f32) -> Mat4 {
    let pivot = Vec3::new(0.0, 0.0, distance);
    Mat4::from_translation(pivot) * Mat4::from_rotation_y(angle) * Mat4::from_translation(-pivot)
}

fn forearm(side_y: f32, phase: f32, stroke: &StrokeCurve) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, side_y, FOREARM_Z))
        * pivot_rotation(stroke.forearm_pivot, phase * stroke.gain)
        * Mat4::from_scale(ARM_SCALE)
}

fn upper_arm(side_y: f32, phase: f32, stroke: &StrokeCurve) -> Mat4 {
    let sweep = phase * stroke.gain;
    let arc = |lift: f32| {
        Mat4::from_translation(Vec3::new(
            stroke.amplitude * (-sweep).sin(),
            0.0,
            -sweep.cos() + lift,
        ))
    };
    let stroke_transform = match stroke_branch(phase, stroke) {
        StrokeBranch::Reach => arc(stroke.reach_lift),
        StrokeBranch::Sweep => arc(stroke.sweep_lift),
        StrokeBranch::Recover => pivot_rotation(stroke.recovery_pivot, sweep),
    };
    Mat4::from_translation(Vec3::new(0.0, side_y, UPPER_ARM_Z))
        * stroke_transform
        * Mat4::from_scale(ARM_SCALE)
}

fn upper_leg(side_y: f32, angle: f32, kick: &KickShape) -> Mat4 {
    let hip_angle = match kick.clamp {
        Some(clamp) => angle.min(clamp),
        None => angle,
    };
    Mat4::from_translation(Vec3::new(0.0, side_y, UPPER_LEG_Z))
        * pivot_rotation(kick.hip_pivot, hip_angle)
        * Mat4::from_scale(UPPER_LEG_SCALE)
}

fn lower_leg(side_y: f32, angle: f32, kick: &KickShape) -> Mat4 {
    let knee = match kick_branch(angle, kick) {
        KickBranch::Amplified => pivot_rotation(kick.amplified_knee_pivot, angle * kick.amplify),
        KickBranch::Plain => pivot_rotation(kick.knee_pivot, angle),
    };
    Mat4::from_translation(Vec3::new(0.0, side_y, LOWER_LEG_Z))
        * knee
        * Mat4::from_scale(LOWER_LEG_SCALE)
}

fn standing_pose() -> Pose {
    STANDING.map(|spec| LimbPose {
        limb: spec.limb,
        model: spec.model(),
    })
}

fn swimming_pose(state: &AnimationState, profile: &MotionProfile) -> Pose {
    let stroke = &profile.stroke;
    let kick = &profile.kick;
    Limb::ALL.map(|limb| {
        let model = match limb {
            Limb::Head => STANDING[0].model(),
            Limb::Body => STANDING[1].model(),
            Limb::LeftForearm => forearm(SHOULDER_Y, state.left_arm, stroke),
            Limb::LeftUpperArm => upper_arm(SHOULDER_Y, state.left_arm, stroke),
            Limb::RightForearm => forearm(-SHOULDER_Y, state.right_arm, stroke),
            Limb::RightUpperArm => upper_arm(-SHOULDER_Y, state.right_arm, stroke),
            Limb::LeftUpperLeg => upper_leg(HIP_Y, state.leg, kick),
            Limb::LeftLowerLeg => lower_leg(HIP_Y, state.leg, kick),
            Limb::RightUpperLeg => upper_leg(-HIP_Y, -state.leg, kick),
            Limb::RightLowerLeg => lower_leg(-HIP_Y, -state.leg, kick),
        };
        LimbPose { limb, model }
    })
}

/// Evaluates the model matrix of every limb.
pub fn evaluate(state: &AnimationState, mode: Mode, profile: &MotionProfile) -> Pose {
    match mode {
        Mode::Standing => standing_pose(),
        Mode::Swimming => swimming_pose(state, profile),
    }
}
