//! The float cycle state machine.
//!
//! # Phase table
//!
//! | Phase              | Each step                          | Leaves when                          |
//! |--------------------|------------------------------------|--------------------------------------|
//! | 0 `InitDescend`    | sink `v·dt`, never past parking    | depth == parking at step start       |
//! | 1 `Drift`          | `drift_age += dt`                  | `drift_age >= drift_time`            |
//! | 2 `ProfileDescend` | sink `v·dt`, never past profile    | depth >= profile at step start       |
//! | 3 `ProfileAscend`  | rise `v·dt`                        | the rise would reach the surface     |
//! | 4 `Transmit`       | hold at the surface                | `cycle_age >= cycle_duration`        |
//!
//! The phases are evaluated in order within one step, so a float that leaves
//! phase *n* also runs phase *n + 1* in the same step.  Leaving phase 4
//! starts the next cycle and its first descent step, but phase 0 itself runs
//! only from the following step.
//!
//! # Drift time
//!
//! The drift phase takes whatever the cycle duration leaves after the three
//! vertical transits and the transmission reserve, floored to a whole number
//! of timesteps.  It is recomputed every step from the *effective* depths:
//! parking and profile depths capped at the domain bottom, and overridden by
//! a grounding recovery for the step in which it happens.

use tracing::{debug, info};

use vf_agent::{CyclePhase, FloatState};
use vf_field::FieldConstants;
use vf_mission::{MissionProfile, TRANSMISSION_RESERVE_SECS};

use crate::{Grounding, GroundingCheck, KernelContext};

// ── VerticalMove ──────────────────────────────────────────────────────────────

/// Depth change accumulated during one step.
///
/// `To` pins the float to an exact target so the landing depth does not
/// depend on `depth + (target - depth)` rounding back to `target`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum VerticalMove {
    By(f64),
    To(f64),
}

impl VerticalMove {
    pub const HOLD: VerticalMove = VerticalMove::By(0.0);

    /// Add `d` metres (positive downward) to the move.
    #[inline]
    pub fn add(self, depth: f64, d: f64) -> VerticalMove {
        match self {
            VerticalMove::By(x) => VerticalMove::By(x + d),
            VerticalMove::To(t) => VerticalMove::By(t - depth + d),
        }
    }

    /// Depth reached from `depth` after the move.
    #[inline]
    pub fn next_depth(self, depth: f64) -> f64 {
        match self {
            VerticalMove::By(x) => depth + x,
            VerticalMove::To(t) => t,
        }
    }
}

// ── CycleOutcome ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CycleOutcome {
    /// Keep stepping; the float should move to this depth.
    Continue(f64),
    /// Life expectancy exhausted; the float must be removed.
    Expired,
}

// ── Drift time ────────────────────────────────────────────────────────────────

/// Drift duration in seconds, floored to a multiple of `dt`.
pub fn drift_time_secs(
    mission:       &MissionProfile,
    surface_depth: f64,
    drift_depth:   f64,
    profile_depth: f64,
    dt:            f64,
) -> f64 {
    let raw = mission.cycle_secs()
        - mission.transit_secs(surface_depth, drift_depth, profile_depth)
        - TRANSMISSION_RESERVE_SECS;
    (raw / dt).floor() * dt
}

/// Drift and profile depths the float can actually reach this step.
pub fn effective_depths(
    state:     &FloatState,
    mission:   &MissionProfile,
    constants: &FieldConstants,
    check:     &GroundingCheck,
) -> (f64, f64) {
    let mut drift = mission.parking_depth.min(constants.bottom_depth);
    let mut profile = mission.profile_depth.min(constants.bottom_depth);
    match check.grounding {
        Grounding::DuringDescentOrDrift => drift = state.depth + check.delta,
        Grounding::DuringProfileDescent => profile = state.depth,
        Grounding::Afloat | Grounding::Ignored => {}
    }
    (drift, profile)
}

// ── Kernel ────────────────────────────────────────────────────────────────────

/// Advance one float through one step of its cycle.
///
/// `check` is this step's grounding result; its delta seeds the depth
/// change.  Updates phase, ages and cycle number in place and returns the
/// depth the float should move to.  Depth itself is left for the caller to
/// write once the boundary handlers have run.
pub fn advance_cycle(
    state:   &mut FloatState,
    mission: &MissionProfile,
    ctx:     &KernelContext,
    check:   GroundingCheck,
) -> CycleOutcome {
    let c = &ctx.constants;
    let dt = ctx.dt;
    let step = mission.vertical_speed * dt;

    let (drift_depth, profile_depth) = effective_depths(state, mission, c, &check);
    let drift_time = drift_time_secs(mission, c.surface_depth, drift_depth, profile_depth, dt);

    let mut depth = state.depth;
    let mut mv = VerticalMove::By(check.delta);

    if state.cycle_phase == CyclePhase::InitDescend {
        mv = mv.add(depth, step);
        if depth == mission.parking_depth {
            if ctx.verbose() {
                debug!(float = %ctx.float, cycle = state.cycle_number, depth, "reached parking depth, drifting");
            }
            state.cycle_phase = CyclePhase::Drift;
            state.drift_age = 0.0;
            mv = VerticalMove::HOLD;
        }
        if mv.next_depth(depth) > mission.parking_depth {
            mv = VerticalMove::To(mission.parking_depth);
        }
    }

    if state.cycle_phase == CyclePhase::Drift {
        state.drift_age += dt;
        if state.drift_age >= drift_time {
            if ctx.verbose() {
                debug!(float = %ctx.float, cycle = state.cycle_number, drift_time, "drift complete, descending to profile depth");
            }
            state.drift_age = 0.0;
            state.cycle_phase = CyclePhase::ProfileDescend;
        }
    }

    if state.cycle_phase == CyclePhase::ProfileDescend {
        mv = mv.add(depth, step);
        if mv.next_depth(depth) >= profile_depth {
            mv = VerticalMove::To(profile_depth);
        }
        if depth >= profile_depth {
            if ctx.verbose() {
                debug!(float = %ctx.float, cycle = state.cycle_number, depth, "reached profile depth, ascending");
            }
            state.cycle_phase = CyclePhase::ProfileAscend;
        }
    }

    if state.cycle_phase == CyclePhase::ProfileAscend {
        mv = mv.add(depth, -step);
        if mv.next_depth(depth) <= c.surface_depth {
            if ctx.verbose() {
                debug!(float = %ctx.float, cycle = state.cycle_number, "surfaced, transmitting");
            }
            depth = c.surface_depth;
            mv = VerticalMove::To(c.surface_depth);
            state.cycle_phase = CyclePhase::Transmit;
        }
    }

    if state.cycle_phase == CyclePhase::Transmit && state.cycle_age >= mission.cycle_secs() {
        if ctx.verbose() {
            info!(float = %ctx.float, cycle = state.cycle_number, "cycle complete");
        }
        state.cycle_phase = CyclePhase::InitDescend;
        state.cycle_age = 0.0;
        state.cycle_number += 1;
        mv = mv.add(depth, step);
    }

    if state.cycle_number > mission.life_expectancy {
        if ctx.verbose() {
            info!(
                float = %ctx.float,
                cycle = state.cycle_number,
                life = mission.life_expectancy,
                "life expectancy exhausted"
            );
        }
        return CycleOutcome::Expired;
    }

    state.cycle_age += dt;
    CycleOutcome::Continue(mv.next_depth(depth))
}
