//! Deployment plans: where and when each float enters the water.
//!
//! # CSV format
//!
//! One row per float, in fleet order (row `i` becomes `FloatId(i)`).
//! `time` is a Unix timestamp in seconds.
//!
//! ```csv
//! lat,lon,depth,time
//! 41.20,-11.75,2.5,1577836800
//! 43.90,-10.10,2.5,1577836800
//! ```
//!
//! A plan can also be generated: [`DeploymentPlan::random_box`] scatters
//! floats uniformly inside a lat/lon rectangle, all deployed at the same
//! depth and time.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use vf_core::{GeoPoint, SimRng};

use crate::{MissionError, MissionResult};

// ── Deployment ────────────────────────────────────────────────────────────────

/// Initial position and time of one float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deployment {
    pub lat: f64,
    pub lon: f64,
    /// Initial depth (m, positive downward).
    pub depth: f64,
    /// Unix timestamp at which the float enters the water.
    pub time_unix_secs: i64,
}

impl Deployment {
    #[inline]
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

// ── DeploymentPlan ────────────────────────────────────────────────────────────

/// Ordered list of deployments, one per float.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeploymentPlan {
    pub deployments: Vec<Deployment>,
}

impl DeploymentPlan {
    pub fn new(deployments: Vec<Deployment>) -> Self {
        Self { deployments }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.deployments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.deployments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Deployment> {
        self.deployments.iter()
    }

    /// Scatter `count` floats uniformly inside a `size_lat` × `size_lon`
    /// degree box centred on `center`.
    ///
    /// Every float shares `depth` and `time_unix_secs`.  Sampling uses the
    /// caller's RNG so a seeded run reproduces the same fleet.
    pub fn random_box(
        center:         GeoPoint,
        size_lat:       f64,
        size_lon:       f64,
        count:          usize,
        depth:          f64,
        time_unix_secs: i64,
        rng:            &mut SimRng,
    ) -> Self {
        let half_lat = size_lat.abs() * 0.5;
        let half_lon = size_lon.abs() * 0.5;
        let deployments = (0..count)
            .map(|_| {
                let u: f64 = rng.random();
                let v: f64 = rng.random();
                Deployment {
                    lat: center.lat - half_lat + u * 2.0 * half_lat,
                    lon: center.lon - half_lon + v * 2.0 * half_lon,
                    depth,
                    time_unix_secs,
                }
            })
            .collect();
        Self { deployments }
    }

    /// Earliest deployment time in the plan, if any.
    pub fn first_time(&self) -> Option<i64> {
        self.deployments.iter().map(|d| d.time_unix_secs).min()
    }
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PlanRecord {
    lat:   f64,
    lon:   f64,
    depth: f64,
    time:  i64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a deployment plan from a CSV file.
pub fn load_plan_csv(path: &Path) -> MissionResult<DeploymentPlan> {
    let file = std::fs::File::open(path)?;
    load_plan_reader(file)
}

/// Like [`load_plan_csv`] but accepts any `Read` source.
pub fn load_plan_reader<R: Read>(reader: R) -> MissionResult<DeploymentPlan> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut deployments = Vec::new();

    for (row_no, result) in csv_reader.deserialize::<PlanRecord>().enumerate() {
        let row = result.map_err(|e| MissionError::Parse(e.to_string()))?;
        if !(row.lat.is_finite() && row.lon.is_finite() && row.depth.is_finite()) {
            return Err(MissionError::Parse(format!(
                "row {}: non-finite coordinate ({}, {}, {})",
                row_no + 1,
                row.lat,
                row.lon,
                row.depth
            )));
        }
        if !(-90.0..=90.0).contains(&row.lat) {
            return Err(MissionError::Parse(format!(
                "row {}: latitude {} outside [-90, 90]",
                row_no + 1,
                row.lat
            )));
        }
        deployments.push(Deployment {
            lat:            row.lat,
            lon:            row.lon,
            depth:          row.depth,
            time_unix_secs: row.time,
        });
    }

    Ok(DeploymentPlan { deployments })
}
