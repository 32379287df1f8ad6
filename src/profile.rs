/// Milliseconds that must elapse before a tick changes the animation state.
pub const TICK_INTERVAL_MS: u64 = 10;

/// Upper-arm stroke curve, shared by both profiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeCurve {
    /// End of the first (reach) branch, exclusive
    pub reach_end: f32,
    /// End of the second (sweep) branch, exclusive
    pub sweep_end: f32,
    /// Phase to rotation angle multiplier
    pub gain: f32,
    /// Sideways amplitude of the reach and sweep arcs
    pub amplitude: f32,
    /// Depth offset added during the reach branch
    pub reach_lift: f32,
    /// Depth offset added during the sweep branch
    pub sweep_lift: f32,
    /// Distance of the recovery pivot along the limb axis
    pub recovery_pivot: f32,
    /// Distance of the forearm pivot along the limb axis
    pub forearm_pivot: f32,
}

pub const STROKE: StrokeCurve = StrokeCurve {
    reach_end: 0.45,
    sweep_end: 0.64,
    gain: 5.0,
    amplitude: 0.8,
    reach_lift: 1.0,
    sweep_lift: 2.2,
    recovery_pivot: 1.6,
    forearm_pivot: 0.4,
};

/// Leg kick shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickShape {
    /// Upper-leg rotation stops growing past this angle. `None` means unclamped.
    pub clamp: Option<f32>,
    /// Lower-leg rotation multiplier once the clamp is active
    pub amplify: f32,
    /// Hip pivot distance along the limb axis
    pub hip_pivot: f32,
    /// Knee pivot distance while the clamp is inactive
    pub knee_pivot: f32,
    /// Knee pivot distance while the clamp is active
    pub amplified_knee_pivot: f32,
}

/// Complete set of tunables for one variant of the animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    pub name: &'static str,
    /// Arm phase resets to zero once it reaches this value
    pub arm_wrap: f32,
    /// Arm phase advance, in degrees per elapsed millisecond
    pub arm_rate_deg_per_ms: f32,
    /// Leg phase advances this many times faster than the arms
    pub leg_rate_factor: f32,
    /// Leg phase reverses direction at plus or minus this value
    pub leg_bound: f32,
    pub stroke: StrokeCurve,
    pub kick: KickShape,
}

impl MotionProfile {
    /// First submission: legs swing freely within +-0.3.
    pub const FREE_KICK: MotionProfile = MotionProfile {
        name: "free-kick",
        arm_wrap: 1.26,
        arm_rate_deg_per_ms: 0.036,
        leg_rate_factor: 3.0,
        leg_bound: 0.3,
        stroke: STROKE,
        kick: KickShape {
            clamp: None,
            amplify: 1.0,
            hip_pivot: 1.5,
            knee_pivot: 3.0,
            amplified_knee_pivot: 3.0,
        },
    };

    /// Second submission: legs oscillate within +-0.5 but the thigh stops at
    /// 0.3 and the shin snaps to an amplified kick past that point.
    pub const CLAMPED_KICK: MotionProfile = MotionProfile {
        name: "clamped-kick",
        arm_wrap: 1.26,
        arm_rate_deg_per_ms: 0.036,
        leg_rate_factor: 3.0,
        leg_bound: 0.5,
        stroke: STROKE,
        kick: KickShape {
            clamp: Some(0.3),
            amplify: 1.3,
            hip_pivot: 1.5,
            knee_pivot: 3.0,
            amplified_knee_pivot: 2.2,
        },
    };

    pub const ALL: [MotionProfile; 2] = [Self::CLAMPED_KICK, Self::FREE_KICK];

    /// Arm phase advance in radians for `elapsed_ms` milliseconds.
    pub fn arm_step(&self, elapsed_ms: u64) -> f32 {
        (elapsed_ms as f32 * self.arm_rate_deg_per_ms).to_radians()
    }
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self::CLAMPED_KICK
    }
}
