//! Sea-floor depth sources.
//!
//! # Sources
//!
//! | Variant  | Lookup                                                        |
//! |----------|---------------------------------------------------------------|
//! | `Flat`   | One depth everywhere                                          |
//! | `Grid`   | Regular lat/lon grid, nearest cell                            |
//! | `Points` | Scattered soundings, nearest sounding via an R-tree           |
//!
//! All sources are static in time.  Lookups never fail: a grid clamps to
//! its edge cells and a point set always has a nearest neighbour.
//!
//! # Soundings CSV
//!
//! ```csv
//! lat,lon,depth
//! 41.0,-12.0,4800
//! 41.5,-11.5,3200
//! ```

use std::io::Read;
use std::path::Path;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use vf_core::GeoPoint;

use crate::{FieldError, FieldResult};

// ── Bathymetry ────────────────────────────────────────────────────────────────

pub enum Bathymetry {
    Flat(f64),
    Grid(BathymetryGrid),
    Points(BathymetryPoints),
}

impl Bathymetry {
    /// Sea-floor depth at `(lat, lon)`.
    #[inline]
    pub fn depth_at(&self, lat: f64, lon: f64) -> f64 {
        match self {
            Bathymetry::Flat(d)   => *d,
            Bathymetry::Grid(g)   => g.depth_at(lat, lon),
            Bathymetry::Points(p) => p.depth_at(lat, lon),
        }
    }

    /// Deepest value the source can return.
    pub fn max_depth(&self) -> f64 {
        match self {
            Bathymetry::Flat(d)   => *d,
            Bathymetry::Grid(g)   => g.values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Bathymetry::Points(p) => p.max_depth,
        }
    }
}

// ── BathymetryGrid ────────────────────────────────────────────────────────────

/// Depths on a regular lat/lon grid, row-major by latitude.
///
/// Cell `(i, j)` is centred on `(lat0 + i·dlat, lon0 + j·dlon)` and its depth
/// is `values[i * n_lon + j]`.
#[derive(Debug, Clone)]
pub struct BathymetryGrid {
    pub lat0:   f64,
    pub lon0:   f64,
    pub dlat:   f64,
    pub dlon:   f64,
    pub n_lat:  usize,
    pub n_lon:  usize,
    pub values: Vec<f64>,
}

impl BathymetryGrid {
    pub fn new(
        lat0:   f64,
        lon0:   f64,
        dlat:   f64,
        dlon:   f64,
        n_lat:  usize,
        n_lon:  usize,
        values: Vec<f64>,
    ) -> FieldResult<Self> {
        if n_lat == 0 || n_lon == 0 {
            return Err(FieldError::InvalidGrid(format!("empty grid {n_lat}×{n_lon}")));
        }
        if values.len() != n_lat * n_lon {
            return Err(FieldError::InvalidGrid(format!(
                "{n_lat}×{n_lon} grid needs {} values, got {}",
                n_lat * n_lon,
                values.len()
            )));
        }
        if !(dlat > 0.0 && dlon > 0.0) {
            return Err(FieldError::InvalidGrid(format!(
                "cell size must be positive, got dlat {dlat} dlon {dlon}"
            )));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(FieldError::InvalidGrid(format!("non-finite depth {bad}")));
        }
        Ok(Self { lat0, lon0, dlat, dlon, n_lat, n_lon, values })
    }

    /// Build a grid by sampling `f(lat, lon)` at every cell centre.
    pub fn from_fn(
        lat0:  f64,
        lon0:  f64,
        dlat:  f64,
        dlon:  f64,
        n_lat: usize,
        n_lon: usize,
        f:     impl Fn(f64, f64) -> f64,
    ) -> FieldResult<Self> {
        let mut values = Vec::with_capacity(n_lat * n_lon);
        for i in 0..n_lat {
            let lat = lat0 + i as f64 * dlat;
            for j in 0..n_lon {
                values.push(f(lat, lon0 + j as f64 * dlon));
            }
        }
        Self::new(lat0, lon0, dlat, dlon, n_lat, n_lon, values)
    }

    /// Nearest-cell depth; positions off the grid use the edge cell.
    #[inline]
    pub fn depth_at(&self, lat: f64, lon: f64) -> f64 {
        let i = nearest_index(lat, self.lat0, self.dlat, self.n_lat);
        let j = nearest_index(lon, self.lon0, self.dlon, self.n_lon);
        self.values[i * self.n_lon + j]
    }
}

#[inline]
fn nearest_index(x: f64, origin: f64, step: f64, n: usize) -> usize {
    let k = ((x - origin) / step).round();
    if k.is_nan() || k <= 0.0 {
        0
    } else {
        (k as usize).min(n - 1)
    }
}

// ── BathymetryPoints ──────────────────────────────────────────────────────────

/// R-tree entry: a `[lat, lon]` sounding and its depth.
#[derive(Clone)]
struct Sounding {
    point: [f64; 2],
    depth: f64,
}

impl RTreeObject for Sounding {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for Sounding {
    /// Squared Euclidean distance in degrees; soundings are dense enough
    /// that the lat/lon distortion does not change the nearest one.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

/// Scattered soundings with nearest-neighbour lookup.
pub struct BathymetryPoints {
    tree:      RTree<Sounding>,
    max_depth: f64,
}

impl BathymetryPoints {
    /// Bulk-load an R-tree from `(position, depth)` pairs.
    pub fn new(soundings: impl IntoIterator<Item = (GeoPoint, f64)>) -> FieldResult<Self> {
        let entries: Vec<Sounding> = soundings
            .into_iter()
            .map(|(p, depth)| Sounding { point: [p.lat, p.lon], depth })
            .collect();
        if entries.is_empty() {
            return Err(FieldError::NoSoundings);
        }
        let max_depth = entries.iter().map(|s| s.depth).fold(f64::NEG_INFINITY, f64::max);
        Ok(Self { tree: RTree::bulk_load(entries), max_depth })
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    #[inline]
    pub fn depth_at(&self, lat: f64, lon: f64) -> f64 {
        self.tree
            .nearest_neighbor(&[lat, lon])
            .map_or(self.max_depth, |s| s.depth)
    }
}

// ── Soundings loader ──────────────────────────────────────────────────────────

/// Load scattered soundings from a `lat,lon,depth` CSV file.
pub fn load_soundings_csv(path: &Path) -> FieldResult<BathymetryPoints> {
    let file = std::fs::File::open(path)?;
    load_soundings_reader(file)
}

/// Like [`load_soundings_csv`] but accepts any `Read` source.
pub fn load_soundings_reader<R: Read>(reader: R) -> FieldResult<BathymetryPoints> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut soundings = Vec::new();

    for (row_no, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| FieldError::Parse(e.to_string()))?;
        let sounding = parse_sounding(&record)
            .map_err(|msg| FieldError::Parse(format!("row {}: {msg}", row_no + 1)))?;
        soundings.push(sounding);
    }

    BathymetryPoints::new(soundings)
}

// Columns by position: lat, lon, depth.
fn parse_sounding(record: &csv::StringRecord) -> Result<(GeoPoint, f64), String> {
    let field = |i: usize, name: &str| -> Result<f64, String> {
        let raw = record.get(i).ok_or_else(|| format!("missing {name}"))?;
        raw.trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid {name} {raw:?}"))
    };
    let lat = field(0, "lat")?;
    let lon = field(1, "lon")?;
    Ok((GeoPoint::new(lat, lon), field(2, "depth")?))
}
