//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Floats drift for months across
//! ocean basins, and repeated small metric offsets accumulate; single
//! precision loses metres per step at that scale.

/// Mean Earth radius, metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Move by `east_m` / `north_m` metres on a spherical Earth.
    ///
    /// Local flat-Earth approximation: exact enough for the few hundred
    /// metres a float drifts in one step.
    pub fn offset_m(self, east_m: f64, north_m: f64) -> GeoPoint {
        let d_lat = (north_m / EARTH_RADIUS_M).to_degrees();
        let cos_lat = self.lat.to_radians().cos().max(1e-6);
        let d_lon = (east_m / (EARTH_RADIUS_M * cos_lat)).to_degrees();
        GeoPoint::new(self.lat + d_lat, self.lon + d_lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
