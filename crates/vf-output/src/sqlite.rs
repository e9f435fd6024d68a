//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `trajectories.db` file in the configured output
//! directory with two tables: `float_snapshots` and `step_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::{FloatSnapshotRow, OutputResult, StepSummaryRow};
use crate::writer::OutputWriter;

/// Writes trajectories to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `trajectories.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("trajectories.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS float_snapshots (
                 float_id     INTEGER NOT NULL,
                 tick         INTEGER NOT NULL,
                 time         INTEGER NOT NULL,
                 cycle_phase  INTEGER NOT NULL,
                 cycle_number INTEGER NOT NULL,
                 cycle_age    REAL    NOT NULL,
                 in_water     INTEGER NOT NULL,
                 lat          REAL    NOT NULL,
                 lon          REAL    NOT NULL,
                 depth        REAL    NOT NULL
             );
             CREATE INDEX IF NOT EXISTS float_snapshots_float
                 ON float_snapshots (float_id, tick);
             CREATE TABLE IF NOT EXISTS step_summaries (
                 tick           INTEGER PRIMARY KEY,
                 unix_time_secs INTEGER NOT NULL,
                 active_floats  INTEGER NOT NULL,
                 removed_floats INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[FloatSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO float_snapshots \
                 (float_id, tick, time, cycle_phase, cycle_number, cycle_age, in_water, lat, lon, depth) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.float_id,
                    row.tick as i64,
                    row.time,
                    row.cycle_phase,
                    row.cycle_number,
                    row.cycle_age,
                    row.in_water as i64,
                    row.lat,
                    row.lon,
                    row.depth,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO step_summaries (tick, unix_time_secs, active_floats, removed_floats) \
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                row.tick as i64,
                row.unix_time_secs,
                row.active_floats as i64,
                row.removed_floats as i64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
