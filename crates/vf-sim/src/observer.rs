//! Simulation observer trait for progress reporting and data collection.

use vf_agent::FleetStore;
use vf_core::{FloatId, Tick};
use vf_kernel::DestroyReason;

/// Per-step counts handed to [`SimObserver::on_step_end`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Unix time at the start of the step.
    pub unix_time_secs: i64,
    /// Floats that entered the water this step.
    pub deployed: usize,
    /// Floats active after the step.
    pub active: usize,
    /// Floats that expired or were lost this step.
    pub removed: usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// step loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, tick: Tick, report: &StepReport) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: {} floats active", report.active);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each step, before any processing.
    fn on_step_start(&mut self, _tick: Tick) {}

    /// Called once per removed float, in ascending `FloatId` order, after
    /// every float has been stepped.
    fn on_float_removed(&mut self, _tick: Tick, _float: FloatId, _reason: DestroyReason) {}

    /// Called at the end of each step.
    fn on_step_end(&mut self, _tick: Tick, _report: &StepReport) {}

    /// Called at recording intervals (every `config.output_interval_ticks`
    /// ticks) with the fleet as it stands at the start of the step.
    ///
    /// Only floats whose status is active belong in a trajectory record.
    fn on_snapshot(&mut self, _tick: Tick, _unix_time_secs: i64, _fleet: &FleetStore) {}

    /// Called once after the final step, or after the step at which the run
    /// was cancelled.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
