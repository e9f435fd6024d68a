//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `float_snapshots.parquet`
//! - `step_summaries.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    BooleanBuilder, Float64Builder, Int64Builder, UInt8Builder, UInt32Builder, UInt64Builder,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{FloatSnapshotRow, OutputResult, StepSummaryRow};

/// Step summaries are buffered and written in batches of this many rows.
const SUMMARY_BATCH_ROWS: usize = 4_096;

fn snapshot_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("float_id",     DataType::UInt32,  false),
        Field::new("tick",         DataType::UInt64,  false),
        Field::new("time",         DataType::Int64,   false),
        Field::new("cycle_phase",  DataType::UInt8,   false),
        Field::new("cycle_number", DataType::UInt32,  false),
        Field::new("cycle_age",    DataType::Float64, false),
        Field::new("in_water",     DataType::Boolean, false),
        Field::new("lat",          DataType::Float64, false),
        Field::new("lon",          DataType::Float64, false),
        Field::new("depth",        DataType::Float64, false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",           DataType::UInt64, false),
        Field::new("unix_time_secs", DataType::Int64,  false),
        Field::new("active_floats",  DataType::UInt64, false),
        Field::new("removed_floats", DataType::UInt64, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes trajectories to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    snapshots:   Option<ArrowWriter<File>>,
    summaries:   Option<ArrowWriter<File>>,
    snap_schema: Arc<Schema>,
    summ_schema: Arc<Schema>,
    pending:     Vec<StepSummaryRow>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let snap_schema = snapshot_schema();
        let summ_schema = summary_schema();

        let snap_file = File::create(dir.join("float_snapshots.parquet"))?;
        let snapshots = ArrowWriter::try_new(
            snap_file,
            Arc::clone(&snap_schema),
            Some(snappy_props()),
        )?;

        let summ_file = File::create(dir.join("step_summaries.parquet"))?;
        let summaries = ArrowWriter::try_new(
            summ_file,
            Arc::clone(&summ_schema),
            Some(snappy_props()),
        )?;

        Ok(Self {
            snapshots: Some(snapshots),
            summaries: Some(summaries),
            snap_schema,
            summ_schema,
            pending:   Vec::with_capacity(SUMMARY_BATCH_ROWS),
        })
    }

    fn flush_summaries(&mut self) -> OutputResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut ticks      = UInt64Builder::new();
        let mut unix_times = Int64Builder::new();
        let mut active     = UInt64Builder::new();
        let mut removed    = UInt64Builder::new();

        for row in self.pending.drain(..) {
            ticks.append_value(row.tick);
            unix_times.append_value(row.unix_time_secs);
            active.append_value(row.active_floats);
            removed.append_value(row.removed_floats);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(unix_times.finish()),
                Arc::new(active.finish()),
                Arc::new(removed.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }
}

impl OutputWriter for ParquetWriter {
    fn write_snapshots(&mut self, rows: &[FloatSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.snapshots.as_mut() else {
            return Ok(());
        };

        let mut float_ids     = UInt32Builder::new();
        let mut ticks         = UInt64Builder::new();
        let mut times         = Int64Builder::new();
        let mut phases        = UInt8Builder::new();
        let mut cycle_numbers = UInt32Builder::new();
        let mut cycle_ages    = Float64Builder::new();
        let mut in_water      = BooleanBuilder::new();
        let mut lats          = Float64Builder::new();
        let mut lons          = Float64Builder::new();
        let mut depths        = Float64Builder::new();

        for row in rows {
            float_ids.append_value(row.float_id);
            ticks.append_value(row.tick);
            times.append_value(row.time);
            phases.append_value(row.cycle_phase);
            cycle_numbers.append_value(row.cycle_number);
            cycle_ages.append_value(row.cycle_age);
            in_water.append_value(row.in_water);
            lats.append_value(row.lat);
            lons.append_value(row.lon);
            depths.append_value(row.depth);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.snap_schema),
            vec![
                Arc::new(float_ids.finish()),
                Arc::new(ticks.finish()),
                Arc::new(times.finish()),
                Arc::new(phases.finish()),
                Arc::new(cycle_numbers.finish()),
                Arc::new(cycle_ages.finish()),
                Arc::new(in_water.finish()),
                Arc::new(lats.finish()),
                Arc::new(lons.finish()),
                Arc::new(depths.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        if self.summaries.is_none() {
            return Ok(());
        }
        self.pending.push(*row);
        if self.pending.len() >= SUMMARY_BATCH_ROWS {
            self.flush_summaries()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.flush_summaries()?;
        if let Some(w) = self.snapshots.take() {
            w.close()?;
        }
        if let Some(w) = self.summaries.take() {
            w.close()?;
        }
        Ok(())
    }
}
