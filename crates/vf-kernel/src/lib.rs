//! `vf-kernel`: the per-float, per-step vertical kinematics of a profiling
//! float.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`context`]   | `KernelContext`: field constants, `dt`, time, float label    |
//! | [`grounding`] | `check_grounding`, `Grounding`, `GROUNDING_RISE_M`           |
//! | [`cycle`]     | `advance_cycle`, `drift_time_secs`, `CycleOutcome`           |
//! | [`boundary`]  | `finish_step`, domain/surface handlers, `BoundaryHandlers`   |
//! | [`error`]     | `KernelError`, `KernelResult<T>`                             |
//!
//! # One step of one float
//!
//! ```text
//! check_grounding ─► advance_cycle ─► (advection engine) ─► finish_step
//!    in_water,         phase, ages,       lat/lon,             domain, surface,
//!    recovery          next depth         status               periodic wrap
//! ```
//!
//! [`step`] runs the first two; the driver owns the advection engine and
//! calls [`boundary::finish_step`] with its result.  Every function here
//! touches one float only, so the driver may run floats in parallel.
//!
//! # Diagnostics
//!
//! Phase transitions and recoveries are logged through `tracing` when
//! `FieldConstants::verbose_events` is set; they never change state.

pub mod boundary;
pub mod context;
pub mod cycle;
pub mod error;
pub mod grounding;

#[cfg(test)]
mod tests;

use std::fmt;

use vf_agent::FloatState;
use vf_field::FieldProvider;
use vf_mission::MissionProfile;

pub use boundary::{
    finish_step, keep_in_column, keep_in_domain, keep_in_water, resolve_vertical,
    BoundaryHandlers, BoundaryOutcome, DomainTopology, LatitudeWrap, OutOfBoundsPolicy,
    PeriodicBoundary, COLUMN_RECOVERY_OFFSET_M,
};
pub use context::KernelContext;
pub use cycle::{advance_cycle, drift_time_secs, effective_depths, CycleOutcome, VerticalMove};
pub use error::{KernelError, KernelResult};
pub use grounding::{check_grounding, Grounding, GroundingCheck, GROUNDING_RISE_M};

/// Why a float left the fleet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DestroyReason {
    /// `cycle_number` exceeded the mission's life expectancy.
    LifeExpectancy,
    /// The float left the horizontal or vertical domain.
    OutOfDomain,
}

impl fmt::Display for DestroyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DestroyReason::LifeExpectancy => "life_expectancy",
            DestroyReason::OutOfDomain    => "out_of_domain",
        })
    }
}

/// Result of [`step`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StepOutcome {
    Continue { next_depth: f64, grounding: Grounding },
    Destroy(DestroyReason),
}

/// Grounding check followed by the cycle kernel for one float.
pub fn step<F: FieldProvider + ?Sized>(
    state:   &mut FloatState,
    mission: &MissionProfile,
    ctx:     &KernelContext,
    field:   &F,
) -> StepOutcome {
    let check = check_grounding(state, ctx, field);
    match advance_cycle(state, mission, ctx, check) {
        CycleOutcome::Continue(next_depth) => {
            StepOutcome::Continue { next_depth, grounding: check.grounding }
        }
        CycleOutcome::Expired => StepOutcome::Destroy(DestroyReason::LifeExpectancy),
    }
}
