//! Sea-floor contact recovery.
//!
//! Runs at the start of every step, before the cycle kernel.  A float that
//! finds itself below the local sea floor is moved on in its cycle so it
//! does not keep pushing into the ground:
//!
//! | Phase on contact        | Recovery                                        |
//! |-------------------------|-------------------------------------------------|
//! | init descend, drift     | rise [`GROUNDING_RISE_M`], drift from there     |
//! | profile descend         | start the ascent from the current depth         |
//! | profile ascend, transmit | nothing; the float is already rising          |

use tracing::{debug, warn};

use vf_agent::{CyclePhase, FloatState};
use vf_field::FieldProvider;

use crate::KernelContext;

/// Fixed upward correction applied when a descending or drifting float
/// touches the sea floor, metres.
pub const GROUNDING_RISE_M: f64 = 50.0;

/// What the grounding check found this step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Grounding {
    /// Above the sea floor.
    Afloat,
    /// Touched bottom in phase 0 or 1; rising and drifting.
    DuringDescentOrDrift,
    /// Touched bottom in phase 2; profiling from here.
    DuringProfileDescent,
    /// Touched bottom in phase 3 or 4; no recovery needed.
    Ignored,
}

impl Grounding {
    /// `true` when a recovery was applied.
    #[inline]
    pub fn is_grounded(self) -> bool {
        matches!(self, Grounding::DuringDescentOrDrift | Grounding::DuringProfileDescent)
    }
}

/// Result of [`check_grounding`]: the finding plus the depth change it
/// already committed the float to (negative is upward).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GroundingCheck {
    pub grounding: Grounding,
    pub delta:     f64,
}

impl GroundingCheck {
    pub const AFLOAT: GroundingCheck = GroundingCheck { grounding: Grounding::Afloat, delta: 0.0 };
}

/// Compare the float's depth with the local bathymetry, update `in_water`,
/// and apply the recovery for the float's phase.
pub fn check_grounding<F: FieldProvider + ?Sized>(
    state: &mut FloatState,
    ctx:   &KernelContext,
    field: &F,
) -> GroundingCheck {
    let floor = field.bathymetry(ctx.time, state.depth, state.lat, state.lon);
    state.in_water = state.depth <= floor;
    if state.in_water {
        return GroundingCheck::AFLOAT;
    }

    match state.cycle_phase {
        CyclePhase::InitDescend | CyclePhase::Drift => {
            if ctx.verbose() {
                warn!(
                    float = %ctx.float,
                    phase = %state.cycle_phase,
                    depth = state.depth,
                    floor,
                    "grounded, rising {} m and drifting",
                    GROUNDING_RISE_M
                );
            }
            if state.cycle_phase == CyclePhase::InitDescend {
                state.drift_age = 0.0;
            }
            state.cycle_phase = CyclePhase::Drift;
            let delta = (-GROUNDING_RISE_M).max(ctx.constants.surface_depth - state.depth);
            GroundingCheck { grounding: Grounding::DuringDescentOrDrift, delta }
        }
        CyclePhase::ProfileDescend => {
            if ctx.verbose() {
                warn!(
                    float = %ctx.float,
                    depth = state.depth,
                    floor,
                    "grounded during profile descent, profiling from here"
                );
            }
            state.cycle_phase = CyclePhase::ProfileAscend;
            GroundingCheck { grounding: Grounding::DuringProfileDescent, delta: 0.0 }
        }
        CyclePhase::ProfileAscend | CyclePhase::Transmit => {
            if ctx.verbose() {
                debug!(float = %ctx.float, phase = %state.cycle_phase, "below floor while rising");
            }
            GroundingCheck { grounding: Grounding::Ignored, delta: 0.0 }
        }
    }
}
