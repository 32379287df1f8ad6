use crate::profile::{MotionProfile, TICK_INTERVAL_MS};
use std::time::{Duration, Instant};

/// Phase angles driving the swimming cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Left arm stroke phase, in radians
    pub left_arm: f32,
    /// Right arm stroke phase, in radians
    pub right_arm: f32,
    /// Signed leg kick phase, in radians
    pub leg: f32,
    /// Leg phase is currently decreasing
    pub leg_returning: bool,
}

impl AnimationState {
    pub const INITIAL: AnimationState = AnimationState {
        left_arm: 0.0,
        right_arm: 0.6,
        leg: 0.5,
        leg_returning: false,
    };
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Advances the animation by `elapsed_ms` milliseconds.
///
/// Calls with less than [`TICK_INTERVAL_MS`] elapsed leave the state untouched,
/// which pins the update rate near 100 Hz whatever the frame rate is.
pub fn advance(state: AnimationState, elapsed_ms: u64, profile: &MotionProfile) -> AnimationState {
    if elapsed_ms < TICK_INTERVAL_MS {
        return state;
    }

    let step = profile.arm_step(elapsed_ms);
    let leg_step = step * profile.leg_rate_factor;
    let bound = profile.leg_bound;

    let mut leg_returning = state.leg_returning;
    if !leg_returning && state.leg >= bound {
        leg_returning = true;
    } else if leg_returning && state.leg <= -bound {
        leg_returning = false;
    }

    let leg = if leg_returning {
        (state.leg - leg_step).max(-bound)
    } else {
        (state.leg + leg_step).min(bound)
    };

    AnimationState {
        left_arm: wrap_arm(state.left_arm + step, profile.arm_wrap),
        right_arm: wrap_arm(state.right_arm + step, profile.arm_wrap),
        leg,
        leg_returning,
    }
}

fn wrap_arm(phase: f32, wrap: f32) -> f32 {
    if phase >= wrap {
        0.0
    } else {
        phase
    }
}

/// Feeds wall-clock time into [`advance`].
///
/// The reference instant only moves when a tick was applied, and only by the
/// whole milliseconds that tick consumed. Short frames and sub-millisecond
/// remainders carry over to the next tick.
#[derive(Debug)]
pub struct AnimationClock {
    last_tick: Instant,
}

impl AnimationClock {
    pub fn new(now: Instant) -> Self {
        AnimationClock { last_tick: now }
    }

    pub fn tick(
        &mut self,
        now: Instant,
        state: AnimationState,
        profile: &MotionProfile,
    ) -> AnimationState {
        let elapsed_ms = now.saturating_duration_since(self.last_tick).as_millis() as u64;
        if elapsed_ms < TICK_INTERVAL_MS {
            return state;
        }
        self.last_tick += Duration::from_millis(elapsed_ms);
        advance(state, elapsed_ms, profile)
    }

    /// Drops any time accumulated while the animation was paused.
    pub fn resume(&mut self, now: Instant) {
        self.last_tick = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn short_frames_do_not_move_the_state() {
        let profile = MotionProfile::default();
        let state = AnimationState::INITIAL;
        assert_eq!(advance(state, 0, &profile), state);
        assert_eq!(advance(state, 9, &profile), state);
        assert_ne!(advance(state, 10, &profile), state);
    }

    #[test]
    fn arm_phase_stays_below_wrap_bound() {
        for profile in MotionProfile::ALL {
            for elapsed in [10, 13, 37, 250, 4_000, 10_000] {
                let mut state = AnimationState::INITIAL;
                for _ in 0..2_000 {
                    state = advance(state, elapsed, &profile);
                    assert!(
                        (0.0..profile.arm_wrap).contains(&state.left_arm),
                        "left arm {} escaped with {elapsed} ms ticks",
                        state.left_arm
                    );
                    assert!((0.0..profile.arm_wrap).contains(&state.right_arm));
                }
            }
        }
    }

    #[test]
    fn arm_wraps_to_zero_at_bound() {
        let profile = MotionProfile::default();
        let state = AnimationState {
            left_arm: 1.259,
            ..AnimationState::INITIAL
        };
        let next = advance(state, 100, &profile);
        assert_eq!(next.left_arm, 0.0);
    }

    fn assert_leg_oscillates(profile: MotionProfile) {
        let bound = profile.leg_bound;
        let mut state = AnimationState::INITIAL;
        let mut flips = 0;
        let mut peaks = Vec::new();
        for _ in 0..20_000 {
            let next = advance(state, 10, &profile);
            if next.leg_returning != state.leg_returning {
                flips += 1;
                peaks.push(state.leg);
            }
            // Once inside the bound the phase never leaves it again.
            if state.leg.abs() <= bound + EPSILON {
                assert!(next.leg.abs() <= bound + EPSILON, "leg {} left +-{bound}", next.leg);
            }
            state = next;
        }

        assert!(flips > 10, "expected sustained oscillation, saw {flips} flips");
        // Each reversal happens exactly at alternating bounds.
        for pair in peaks.windows(2).skip(1) {
            assert!(pair[0].signum() != pair[1].signum());
            assert!((pair[0].abs() - bound).abs() < EPSILON);
            assert!((pair[1].abs() - bound).abs() < EPSILON);
        }
    }

    #[test]
    fn leg_oscillates_within_clamped_kick_bound() {
        assert_leg_oscillates(MotionProfile::CLAMPED_KICK);
    }

    #[test]
    fn leg_oscillates_within_free_kick_bound() {
        assert_leg_oscillates(MotionProfile::FREE_KICK);
    }

    #[test]
    fn leg_reverses_once_per_crossing() {
        let profile = MotionProfile::CLAMPED_KICK;
        let state = AnimationState {
            leg: 0.4995,
            leg_returning: false,
            ..AnimationState::INITIAL
        };
        let at_bound = advance(state, 10, &profile);
        assert!(!at_bound.leg_returning);
        assert!((at_bound.leg - 0.5).abs() < EPSILON);

        let reversed = advance(at_bound, 10, &profile);
        assert!(reversed.leg_returning);
        assert!(reversed.leg < at_bound.leg);

        let still_returning = advance(reversed, 10, &profile);
        assert!(still_returning.leg_returning);
        assert!(still_returning.leg < reversed.leg);
    }

    #[test]
    fn clock_accumulates_short_frames() {
        let profile = MotionProfile::default();
        let start = Instant::now();
        let mut clock = AnimationClock::new(start);
        let state = AnimationState::INITIAL;

        let after_short = clock.tick(start + Duration::from_millis(6), state, &profile);
        assert_eq!(after_short, state);

        let after_long = clock.tick(start + Duration::from_millis(12), after_short, &profile);
        assert_eq!(after_long, advance(state, 12, &profile));
    }

    #[test]
    fn clock_keeps_sub_millisecond_remainders() {
        let profile = MotionProfile::default();
        let start = Instant::now();
        let mut clock = AnimationClock::new(start);
        let mut state = AnimationState {
            leg: 0.0,
            ..AnimationState::INITIAL
        };
        let mut applied = 0.0;
        let frame = Duration::from_micros(16_900);
        for n in 1..=60 {
            let next = clock.tick(start + frame * n, state, &profile);
            applied += next.left_arm - state.left_arm;
            state = next;
        }

        // 60 frames of 16.9 ms are 1014 ms, all of which reach the animation
        let expected = profile.arm_step(1_014);
        assert!(
            (applied - expected).abs() < 1e-4,
            "applied {applied}, wall time implies {expected}"
        );
    }

    #[test]
    fn clock_resume_discards_paused_time() {
        let profile = MotionProfile::default();
        let start = Instant::now();
        let mut clock = AnimationClock::new(start);
        clock.resume(start + Duration::from_secs(5));
        let state = clock.tick(
            start + Duration::from_millis(5_010),
            AnimationState::INITIAL,
            &profile,
        );
        assert_eq!(state, advance(AnimationState::INITIAL, 10, &profile));
    }
}
