//! The `FieldProvider` trait.

use crate::FieldConstants;

/// Read-only access to the environment during stepping.
///
/// Queried concurrently from every float in a step, hence `Send + Sync`.
///
/// # Implementing
///
/// Only [`bathymetry`](Self::bathymetry) and [`constants`](Self::constants)
/// are required; [`contains`](Self::contains) defaults to an unbounded
/// domain.
pub trait FieldProvider: Send + Sync {
    /// Sea-floor depth (m, positive downward) at the given time and place.
    ///
    /// `time` is Unix seconds; `depth` is the depth of the query point, for
    /// providers that interpolate in 3-D.
    fn bathymetry(&self, time: f64, depth: f64, lat: f64, lon: f64) -> f64;

    fn constants(&self) -> &FieldConstants;

    /// Whether `(lat, lon)` lies inside the horizontal domain.
    fn contains(&self, _lat: f64, _lon: f64) -> bool {
        true
    }
}
