//! Integration tests for vf-output.

use crate::row::{FloatSnapshotRow, StepSummaryRow};

fn snap_row(float_id: u32, tick: u64) -> FloatSnapshotRow {
    FloatSnapshotRow {
        float_id,
        tick,
        time:         tick as i64 * 300,
        cycle_phase:  1,
        cycle_number: 2,
        cycle_age:    4_500.0,
        in_water:     true,
        lat:          41.5 + float_id as f64,
        lon:          -12.25,
        depth:        1_000.0,
    }
}

fn summary_row(tick: u64) -> StepSummaryRow {
    StepSummaryRow {
        tick,
        unix_time_secs: tick as i64 * 300,
        active_floats:  20,
        removed_floats: tick % 2,
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("float_snapshots.csv").exists());
        assert!(dir.path().join("step_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("float_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["float_id", "tick", "time", "cycle_phase", "cycle_number",
             "cycle_age", "in_water", "lat", "lon", "depth"]
        );

        let mut rdr2 = csv::Reader::from_path(dir.path().join("step_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["tick", "unix_time_secs", "active_floats", "removed_floats"]);
    }

    #[test]
    fn csv_snapshot_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 6), snap_row(1, 6), snap_row(2, 6)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("float_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "0");      // float_id
        assert_eq!(&rows[0][2], "1800");   // time
        assert_eq!(&rows[0][3], "1");      // cycle_phase
        assert_eq!(&rows[0][6], "1");      // in_water
        assert_eq!(&rows[1][7], "42.5");   // lat
        assert_eq!(&rows[2][9], "1000");   // depth
    }

    #[test]
    fn csv_step_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_step_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("step_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "900");
        assert_eq!(&rows[0][2], "20");
        assert_eq!(&rows[0][3], "1");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        let result = CsvWriter::new(&dir.path().join("does/not/exist"));
        assert!(result.is_err());
    }
}

// ── Observer bridge ───────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;

    use vf_agent::FleetBuilder;
    use vf_core::SimConfig;
    use vf_field::{FieldConstants, HaloBounds, OceanField};
    use vf_mission::{Deployment, DeploymentPlan, MissionProfile};
    use vf_sim::{SimBuilder, UniformCurrent};

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn mission() -> MissionProfile {
        MissionProfile {
            parking_depth:   100.0,
            profile_depth:   200.0,
            vertical_speed:  0.1,
            cycle_duration:  4.0,
            life_expectancy: 3,
        }
    }

    #[test]
    fn integration_csv() {
        let config = SimConfig {
            start_unix_secs:       1_205_496_000,
            tick_duration_secs:    60,
            total_ticks:           100,
            seed:                  1,
            num_threads:           Some(1),
            output_interval_ticks: 10,
        };
        let field = OceanField::flat(FieldConstants::new(2.5, 4_000.0).unwrap())
            .with_domain(HaloBounds::new(-12.0, -8.5, 41.0, 47.0));
        // Float 0 crosses the east edge after ~14 steps; float 2 deploys at
        // tick 25.
        let plan = DeploymentPlan::new(vec![
            Deployment { lat: 44.0, lon: -8.51, depth: 2.5, time_unix_secs: 1_205_496_000 },
            Deployment { lat: 43.0, lon: -11.0, depth: 2.5, time_unix_secs: 1_205_496_000 },
            Deployment { lat: 45.0, lon: -10.0, depth: 2.5, time_unix_secs: 1_205_497_500 },
        ]);
        let (fleet, rngs) = FleetBuilder::new(&plan, config.seed)
            .mission(mission())
            .build(&field, &config.make_clock())
            .unwrap();
        let mut sim = SimBuilder::new(config, fleet, rngs, field, UniformCurrent::new(1.0, 0.0))
            .build()
            .unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let mut rdr = csv::Reader::from_path(dir.path().join("float_snapshots.csv")).unwrap();
        let rows: Vec<(u32, u64, i64)> = rdr
            .records()
            .map(|r| {
                let r = r.unwrap();
                (r[0].parse().unwrap(), r[1].parse().unwrap(), r[2].parse().unwrap())
            })
            .collect();

        // Snapshots at ticks 0, 10, …, 90.
        let count = |f: u32| rows.iter().filter(|(id, _, _)| *id == f).count();
        assert_eq!(count(0), 2, "float 0 is lost before tick 20");
        assert_eq!(count(1), 10);
        assert_eq!(count(2), 7, "float 2 is recorded from tick 30");
        for (_, tick, time) in &rows {
            assert_eq!(*time, 1_205_496_000 + *tick as i64 * 60);
        }

        let mut rdr = csv::Reader::from_path(dir.path().join("step_summaries.csv")).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len(), 100);
        let removed: u64 = summaries.iter().map(|r| r[3].parse::<u64>().unwrap()).sum();
        assert_eq!(removed, 1);
        assert_eq!(&summaries[99][2], "2");
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("trajectories.db").exists());
    }

    #[test]
    fn sqlite_snapshot_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 1), snap_row(1, 1), snap_row(2, 1)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("trajectories.db")).unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM float_snapshots", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn sqlite_position_columns() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(4, 2)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("trajectories.db")).unwrap();
        let (lat, lon, depth, in_water): (f64, f64, f64, i64) = conn.query_row(
            "SELECT lat, lon, depth, in_water FROM float_snapshots WHERE float_id = 4",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        ).unwrap();
        assert_eq!(lat, 45.5);
        assert_eq!(lon, -12.25);
        assert_eq!(depth, 1_000.0);
        assert_eq!(in_water, 1, "in_water=true should be stored as 1");
    }

    #[test]
    fn sqlite_step_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_step_summary(&summary_row(7)).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("trajectories.db")).unwrap();
        let (unix_time, active, removed): (i64, i64, i64) = conn.query_row(
            "SELECT unix_time_secs, active_floats, removed_floats FROM step_summaries WHERE tick = 7",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        ).unwrap();
        assert_eq!(unix_time, 2_100);
        assert_eq!(active, 20);
        assert_eq!(removed, 1);
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::*;
    use crate::parquet::ParquetWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn row_count(path: &std::path::Path) -> usize {
        let file = std::fs::File::open(path).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file).unwrap().build().unwrap();
        reader.map(|b| b.unwrap().num_rows()).sum()
    }

    #[test]
    fn parquet_files_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("float_snapshots.parquet").exists());
        assert!(dir.path().join("step_summaries.parquet").exists());
    }

    #[test]
    fn parquet_snapshot_schema() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 2), snap_row(1, 2)]).unwrap();
        w.finish().unwrap();

        let path = dir.path().join("float_snapshots.parquet");
        assert_eq!(row_count(&path), 2);

        let file = std::fs::File::open(&path).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(
            names,
            ["float_id", "tick", "time", "cycle_phase", "cycle_number",
             "cycle_age", "in_water", "lat", "lon", "depth"]
        );
        assert_eq!(*schema.field_with_name("in_water").unwrap().data_type(), DataType::Boolean);
        assert_eq!(*schema.field_with_name("depth").unwrap().data_type(), DataType::Float64);
    }

    #[test]
    fn parquet_buffered_summaries_written_on_finish() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        for tick in 0..10 {
            w.write_step_summary(&summary_row(tick)).unwrap();
        }
        w.finish().unwrap();
        assert_eq!(row_count(&dir.path().join("step_summaries.parquet")), 10);
    }

    #[test]
    fn parquet_finish_required() {
        let dir = tmp();
        {
            let mut w = ParquetWriter::new(dir.path()).unwrap();
            w.write_snapshots(&[snap_row(0, 0)]).unwrap();
        }

        let file = std::fs::File::open(dir.path().join("float_snapshots.parquet")).unwrap();
        let result = ParquetRecordBatchReaderBuilder::try_new(file);
        assert!(result.is_err(), "file without Parquet footer should fail to open");
    }
}
