//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use vf_agent::FleetStore;
use vf_core::Tick;
use vf_sim::{SimObserver, StepReport};

use crate::row::{FloatSnapshotRow, StepSummaryRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes float snapshots and step summaries to any
/// [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Snapshots hold active floats only: pending floats are not in the water
/// yet and removed floats are gone for good.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    rows:       Vec<FloatSnapshotRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rows:       Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step_end(&mut self, tick: Tick, report: &StepReport) {
        let row = StepSummaryRow {
            tick:           tick.0,
            unix_time_secs: report.unix_time_secs,
            active_floats:  report.active as u64,
            removed_floats: report.removed as u64,
        };
        let result = self.writer.write_step_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, unix_time_secs: i64, fleet: &FleetStore) {
        // Reuse the row buffer across snapshots.
        let mut rows = std::mem::take(&mut self.rows);
        rows.clear();
        rows.extend(fleet.active_ids().map(|float| {
            FloatSnapshotRow::new(float, tick, unix_time_secs, &fleet.state[float.index()])
        }));

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
        self.rows = rows;
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
