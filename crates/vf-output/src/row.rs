//! Plain data row types written by output backends.

use vf_agent::FloatState;
use vf_core::{FloatId, Tick};

/// One active float at one recorded step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatSnapshotRow {
    pub float_id:     u32,
    pub tick:         u64,
    /// Unix seconds.
    pub time:         i64,
    /// 0 init descend, 1 drift, 2 profile descend, 3 profile ascend,
    /// 4 transmit.
    pub cycle_phase:  u8,
    pub cycle_number: u32,
    /// Seconds since the current cycle started.
    pub cycle_age:    f64,
    pub in_water:     bool,
    pub lat:          f64,
    pub lon:          f64,
    /// Metres, positive downward.
    pub depth:        f64,
}

impl FloatSnapshotRow {
    pub fn new(float: FloatId, tick: Tick, time: i64, state: &FloatState) -> Self {
        Self {
            float_id:     float.0,
            tick:         tick.0,
            time,
            cycle_phase:  state.cycle_phase.as_u8(),
            cycle_number: state.cycle_number,
            cycle_age:    state.cycle_age,
            in_water:     state.in_water,
            lat:          state.lat,
            lon:          state.lon,
            depth:        state.depth,
        }
    }
}

/// Fleet counts for one simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSummaryRow {
    pub tick:           u64,
    pub unix_time_secs: i64,
    /// Floats active at the end of the step.
    pub active_floats:  u64,
    /// Floats that expired or were lost during the step.
    pub removed_floats: u64,
}
