//! Per-float cycle state.

use std::fmt;

// ── CyclePhase ────────────────────────────────────────────────────────────────

/// Position of a float in its operational cycle.
///
/// ```text
/// InitDescend → Drift → ProfileDescend → ProfileAscend → Transmit
///      ↑                                                     │
///      └─────────────────────────────────────────────────────┘
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CyclePhase {
    /// Descending from the surface to the parking depth.
    #[default]
    InitDescend    = 0,
    /// Drifting at the parking depth.
    Drift          = 1,
    /// Descending from the parking depth to the profile depth.
    ProfileDescend = 2,
    /// Ascending to the surface while profiling.
    ProfileAscend  = 3,
    /// At the surface, transmitting.
    Transmit       = 4,
}

impl CyclePhase {
    pub const ALL: [CyclePhase; 5] = [
        CyclePhase::InitDescend,
        CyclePhase::Drift,
        CyclePhase::ProfileDescend,
        CyclePhase::ProfileAscend,
        CyclePhase::Transmit,
    ];

    /// Numeric phase code, `0..=4`.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(code: u8) -> Option<CyclePhase> {
        CyclePhase::ALL.get(code as usize).copied()
    }

    /// The phase that follows `self` in the cycle.
    #[inline]
    pub fn next(self) -> CyclePhase {
        match self {
            CyclePhase::InitDescend    => CyclePhase::Drift,
            CyclePhase::Drift          => CyclePhase::ProfileDescend,
            CyclePhase::ProfileDescend => CyclePhase::ProfileAscend,
            CyclePhase::ProfileAscend  => CyclePhase::Transmit,
            CyclePhase::Transmit       => CyclePhase::InitDescend,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CyclePhase::InitDescend    => "init_descend",
            CyclePhase::Drift          => "drift",
            CyclePhase::ProfileDescend => "profile_descend",
            CyclePhase::ProfileAscend  => "profile_ascend",
            CyclePhase::Transmit       => "transmit",
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── FloatState ────────────────────────────────────────────────────────────────

/// Mutable state of one float, overwritten in place every step.
///
/// Depth is owned by the cycle kernel; `lat`/`lon` by the advection engine.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatState {
    pub cycle_phase: CyclePhase,
    /// Current cycle, starting at 1.
    pub cycle_number: u32,
    /// Seconds since the current cycle began.
    pub cycle_age: f64,
    /// Seconds spent drifting in the current cycle.
    pub drift_age: f64,
    /// Whether the float was above the sea floor at the last grounding check.
    pub in_water: bool,
    /// Metres, positive downward.
    pub depth: f64,
    pub lat: f64,
    pub lon: f64,
}

impl FloatState {
    /// State of a float just put in the water.
    pub fn deployed(lat: f64, lon: f64, depth: f64) -> Self {
        Self {
            cycle_phase:  CyclePhase::InitDescend,
            cycle_number: 1,
            cycle_age:    0.0,
            drift_age:    0.0,
            in_water:     true,
            depth,
            lat,
            lon,
        }
    }
}

// ── FloatStatus ───────────────────────────────────────────────────────────────

/// Lifecycle of a float within the fleet.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FloatStatus {
    /// Deployment time not reached yet.
    #[default]
    Pending,
    Active,
    /// Life expectancy exhausted.
    Expired,
    /// Left the domain.
    Lost,
    /// Failed deployment validation; never enters the water.
    Rejected,
}

impl FloatStatus {
    #[inline]
    pub fn is_active(self) -> bool {
        self == FloatStatus::Active
    }

    /// `Expired` or `Lost`: the float will never step again.
    #[inline]
    pub fn is_removed(self) -> bool {
        matches!(self, FloatStatus::Expired | FloatStatus::Lost)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FloatStatus::Pending  => "pending",
            FloatStatus::Active   => "active",
            FloatStatus::Expired  => "expired",
            FloatStatus::Lost     => "lost",
            FloatStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for FloatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
