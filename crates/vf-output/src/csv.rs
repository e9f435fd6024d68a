//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `float_snapshots.csv`
//! - `step_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{FloatSnapshotRow, OutputResult, StepSummaryRow};
use crate::writer::OutputWriter;

pub(crate) const SNAPSHOT_COLUMNS: [&str; 10] = [
    "float_id", "tick", "time", "cycle_phase", "cycle_number",
    "cycle_age", "in_water", "lat", "lon", "depth",
];

pub(crate) const SUMMARY_COLUMNS: [&str; 4] =
    ["tick", "unix_time_secs", "active_floats", "removed_floats"];

/// Writes trajectories to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("float_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_COLUMNS)?;

        let mut summaries = Writer::from_path(dir.join("step_summaries.csv"))?;
        summaries.write_record(SUMMARY_COLUMNS)?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[FloatSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.float_id.to_string(),
                row.tick.to_string(),
                row.time.to_string(),
                row.cycle_phase.to_string(),
                row.cycle_number.to_string(),
                row.cycle_age.to_string(),
                (row.in_water as u8).to_string(),
                row.lat.to_string(),
                row.lon.to_string(),
                row.depth.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.unix_time_secs.to_string(),
            row.active_floats.to_string(),
            row.removed_floats.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
