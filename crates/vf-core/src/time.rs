//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to wall-clock time is held in `SimClock`:
//!
//!   wall_time = start_unix_secs + tick * tick_duration_secs
//!
//! The tick duration is the kernel timestep `dt`.  Float missions are
//! expressed in seconds and hours, so a typical run uses 300 s (5 minute)
//! ticks; the float cycle kernel floors its drift time to a multiple of it.

use std::fmt;

use crate::{VfError, VfResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and Unix wall-clock seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: i64,
    /// How many real seconds one tick represents (the kernel `dt`).
    pub tick_duration_secs: u32,
    /// The current tick: advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock starting at `start_unix_secs` with the given resolution.
    pub fn new(start_unix_secs: i64, tick_duration_secs: u32) -> Self {
        Self {
            start_unix_secs,
            tick_duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Timestep length in seconds, as the kernel consumes it.
    #[inline]
    pub fn dt_secs(&self) -> f64 {
        self.tick_duration_secs as f64
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> i64 {
        self.current_tick.0 as i64 * self.tick_duration_secs as i64
    }

    /// Current Unix timestamp corresponding to `current_tick`.
    #[inline]
    pub fn current_unix_secs(&self) -> i64 {
        self.start_unix_secs + self.elapsed_secs()
    }

    /// Unix timestamp of an arbitrary tick.
    #[inline]
    pub fn unix_secs_at(&self, tick: Tick) -> i64 {
        self.start_unix_secs + tick.0 as i64 * self.tick_duration_secs as i64
    }

    /// Break elapsed time into (day, hour, minute) components from sim start.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total_secs = self.elapsed_secs().max(0) as u64;
        let days = total_secs / 86_400;
        let hours = ((total_secs % 86_400) / 3_600) as u32;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        (days, hours, minutes)
    }

    /// First tick at or after Unix time `unix_secs`.  Times before the start
    /// map to tick 0.
    pub fn tick_at_or_after(&self, unix_secs: i64) -> Tick {
        let offset = (unix_secs - self.start_unix_secs).max(0) as u64;
        Tick(offset.div_ceil(self.tick_duration_secs as u64))
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.current_tick, d, h, m)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Unix timestamp for tick 0.
    pub start_unix_secs: i64,

    /// Seconds per tick, i.e. the kernel timestep.  Must be non-zero.
    pub tick_duration_secs: u32,

    /// Total ticks to simulate.  90 days at 5 minute steps: 90 * 288 = 25 920.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Record trajectories every N ticks.  0 disables recording.
    pub output_interval_ticks: u64,
}

impl SimConfig {
    /// Build a configuration from wall durations: total run length, step
    /// length and recording interval, all in seconds.
    ///
    /// The run length and recording interval are rounded up to whole steps.
    pub fn from_durations(
        start_unix_secs: i64,
        duration_secs:   u64,
        step_secs:       u32,
        record_secs:     u64,
        seed:            u64,
    ) -> Self {
        let step = u64::from(step_secs.max(1));
        Self {
            start_unix_secs,
            tick_duration_secs:    step_secs,
            total_ticks:           duration_secs.div_ceil(step),
            seed,
            num_threads:           None,
            output_interval_ticks: record_secs.div_ceil(step),
        }
    }

    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Reject configurations no run can use: a zero timestep, or a worker
    /// pool of zero threads.
    pub fn validate(&self) -> VfResult<()> {
        if self.tick_duration_secs == 0 {
            return Err(VfError::Config("tick_duration_secs must be non-zero".into()));
        }
        if self.num_threads == Some(0) {
            return Err(VfError::Config("num_threads must be at least 1 when set".into()));
        }
        Ok(())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_secs, self.tick_duration_secs)
    }
}
