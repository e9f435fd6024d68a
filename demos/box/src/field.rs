//! Synthetic bathymetry for the demo box.
//!
//! A continental slope shoaling eastward toward the coast, with one seamount
//! in the middle of the box.  Floats in the east touch the slope on their
//! profile descent; floats above the seamount touch it while drifting.

use vf_field::{Bathymetry, BathymetryGrid, FieldResult};

/// Grid resolution, degrees.
const RESOLUTION: f64 = 0.05;

/// Abyssal plain depth, metres.
const PLAIN_M: f64 = 5_000.0;

const SEAMOUNT_LAT: f64 = 41.0;
const SEAMOUNT_LON: f64 = -12.0;

pub fn slope_and_seamount(south: f64, west: f64, north: f64, east: f64) -> FieldResult<Bathymetry> {
    let n_lat = ((north - south) / RESOLUTION).ceil() as usize + 1;
    let n_lon = ((east - west) / RESOLUTION).ceil() as usize + 1;
    let grid = BathymetryGrid::from_fn(south, west, RESOLUTION, RESOLUTION, n_lat, n_lon, depth_at)?;
    Ok(Bathymetry::Grid(grid))
}

fn depth_at(lat: f64, lon: f64) -> f64 {
    // 2 500 m per degree of longitude west of 9.5°W.
    let slope = 200.0 + (-9.5 - lon).max(0.0) * 2_500.0;

    let r2 = (lat - SEAMOUNT_LAT).powi(2) + (lon - SEAMOUNT_LON).powi(2);
    let seamount = PLAIN_M - 4_200.0 * (-r2 / 0.08).exp();

    slope.min(seamount).min(PLAIN_M)
}
