//! box: twenty virtual floats released in a 6° × 3.5° box west of Iberia.
//!
//! All floats enter the water at the same instant, fly the same 10-day
//! mission for 90 days, and drift with a weak southward current plus
//! diffusion.  Floats that cross the box edge are lost; the rest are
//! recorded every 30 minutes to `output/box/`.
//!
//! ```text
//! cargo run -p box-demo --release                      # default mission
//! cargo run -p box-demo --release -- demos/box/float.toml
//! RUST_LOG=vf_kernel=debug cargo run -p box-demo       # per-float events
//! ```

mod field;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::prelude::*;

use vf_agent::FleetBuilder;
use vf_core::{FloatId, GeoPoint, SimConfig, SimRng, Tick};
use vf_field::{FieldConstants, HaloBounds, OceanField};
use vf_kernel::DestroyReason;
use vf_mission::{DeploymentPlan, FloatConfiguration};
use vf_output::{CsvWriter, OutputWriter, SimOutputObserver};
use vf_sim::{RandomWalk, SimBuilder, SimObserver, StepReport};

// ── Constants ─────────────────────────────────────────────────────────────────

const FLOAT_COUNT:   usize = 20;
const SEED:          u64   = 42;
const CENTER:        GeoPoint = GeoPoint { lat: 41.0, lon: -12.0 };
const BOX_LAT_DEG:   f64   = 6.0;
const BOX_LON_DEG:   f64   = 3.5;
const SURFACE_M:     f64   = 2.5;
const BOTTOM_M:      f64   = 5_000.0;
const DEPLOY_UNIX:   i64   = 1_205_496_000; // 2008-03-14 12:00 UTC
const SIM_DAYS:      u64   = 90;
const STEP_SECS:     u32   = 300;
const RECORD_SECS:   u64   = 1_800;
const OUTPUT_DIR:    &str  = "output/box";

// ── Observer wrapper ──────────────────────────────────────────────────────────

/// Counts rows and logs losses on top of the CSV observer.
struct DemoObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    expired:       usize,
    lost:          usize,
}

impl<W: OutputWriter> DemoObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, expired: 0, lost: 0 }
    }
}

impl<W: OutputWriter> SimObserver for DemoObserver<W> {
    fn on_float_removed(&mut self, tick: Tick, float: FloatId, reason: DestroyReason) {
        match reason {
            DestroyReason::LifeExpectancy => self.expired += 1,
            DestroyReason::OutOfDomain    => self.lost += 1,
        }
        info!(%tick, %float, %reason, "float removed");
        self.inner.on_float_removed(tick, float, reason);
    }

    fn on_step_end(&mut self, tick: Tick, report: &StepReport) {
        self.summary_rows += 1;
        self.inner.on_step_end(tick, report);
    }

    fn on_snapshot(&mut self, tick: Tick, unix_time_secs: i64, fleet: &vf_agent::FleetStore) {
        self.snapshot_rows += fleet.active_count();
        self.inner.on_snapshot(tick, unix_time_secs, fleet);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Mission ───────────────────────────────────────────────────────────────────

/// Mission from the TOML file named on the command line, or the demo
/// default: 10-day cycles parking at 1 000 m and profiling from 2 000 m.
fn load_configuration() -> Result<FloatConfiguration> {
    if let Some(path) = std::env::args().nth(1) {
        return FloatConfiguration::from_toml_file(Path::new(&path))
            .with_context(|| format!("loading mission from {path}"));
    }
    let mut config = FloatConfiguration::named("box-demo");
    config.update("cycle_duration", 240.0)?;
    config.update("profile_depth", 2_000.0)?;
    config.update("parking_depth", 1_000.0)?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    println!("=== box: virtual float fleet ===");
    println!("Floats: {FLOAT_COUNT}  |  Days: {SIM_DAYS}  |  Seed: {SEED}");
    println!();

    // 1. Field: the deployment box is also the domain.
    let half_lat = BOX_LAT_DEG / 2.0;
    let half_lon = BOX_LON_DEG / 2.0;
    let halo = HaloBounds::new(
        CENTER.lon - half_lon,
        CENTER.lon + half_lon,
        CENTER.lat - half_lat,
        CENTER.lat + half_lat,
    );
    let constants = FieldConstants::with_halo(SURFACE_M, BOTTOM_M, halo)?;
    let bathymetry = field::slope_and_seamount(halo.south, halo.west, halo.north, halo.east)?;
    let ocean = OceanField::new(bathymetry, constants).bounded_by_halo();

    // 2. Mission.
    let float_config = load_configuration()?;
    println!("{float_config}");

    // 3. Run configuration.
    let config = SimConfig::from_durations(
        DEPLOY_UNIX,
        SIM_DAYS * 86_400,
        STEP_SECS,
        RECORD_SECS,
        SEED,
    );
    println!(
        "Sim: {} steps of {} s, recording every {} steps",
        config.total_ticks, config.tick_duration_secs, config.output_interval_ticks
    );
    println!();

    // 4. Deployment plan and fleet.
    let mut rng = SimRng::new(SEED);
    let plan = DeploymentPlan::random_box(
        CENTER,
        BOX_LAT_DEG,
        BOX_LON_DEG,
        FLOAT_COUNT,
        SURFACE_M,
        DEPLOY_UNIX,
        &mut rng,
    );
    let (fleet, rngs) = FleetBuilder::new(&plan, SEED)
        .configuration(&float_config)
        .build(&ocean, &config.make_clock())?;

    // 5. Build sim.
    let current = RandomWalk::new(-0.01, -0.03, 10.0);
    let mut sim = SimBuilder::new(config, fleet, rngs, ocean, current).build()?;

    // 6. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = DemoObserver::new(SimOutputObserver::new(writer));

    // 7. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 8. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  float_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  step_summaries.csv  : {} rows", obs.summary_rows);
    println!("  expired / lost      : {} / {}", obs.expired, obs.lost);
    println!("  rejected            : {}", sim.fleet.rejected_count());
    println!();

    // 9. Final fleet table.
    println!(
        "{:<8} {:<9} {:>5} {:<16} {:>10} {:>10} {:>8}",
        "Float", "Status", "Cycle", "Phase", "Lat", "Lon", "Depth"
    );
    println!("{}", "-".repeat(72));
    for f in sim.fleet.float_ids() {
        let s = sim.fleet.get(f)?;
        println!(
            "{:<8} {:<9} {:>5} {:<16} {:>10.4} {:>10.4} {:>8.1}",
            f.0,
            sim.fleet.status[f.index()].as_str(),
            s.cycle_number,
            s.cycle_phase.name(),
            s.lat,
            s.lon,
            s.depth,
        );
    }

    Ok(())
}
