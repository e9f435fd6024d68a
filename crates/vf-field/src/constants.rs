//! Run-wide field constants.

use crate::{FieldError, FieldResult};

// ── HaloBounds ────────────────────────────────────────────────────────────────

/// A lat/lon rectangle in degrees.
///
/// As part of [`FieldConstants`] it gives the extents the periodic boundary
/// wraps against; an [`OceanField`](crate::OceanField) can also use one as
/// its horizontal domain.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HaloBounds {
    pub west:  f64,
    pub east:  f64,
    pub south: f64,
    pub north: f64,
}

impl HaloBounds {
    pub fn new(west: f64, east: f64, south: f64, north: f64) -> Self {
        Self { west, east, south, north }
    }

    /// The whole globe.
    pub fn global() -> Self {
        Self::new(-180.0, 180.0, -90.0, 90.0)
    }

    #[inline]
    pub fn lon_width(&self) -> f64 {
        self.east - self.west
    }

    #[inline]
    pub fn lat_height(&self) -> f64 {
        self.north - self.south
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.south..=self.north).contains(&lat) && (self.west..=self.east).contains(&lon)
    }

    fn validate(&self) -> FieldResult<()> {
        let all_finite = [self.west, self.east, self.south, self.north]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite || self.east <= self.west || self.north <= self.south {
            return Err(FieldError::InvalidConstants(format!(
                "halo bounds must be finite with west < east and south < north, got {self:?}"
            )));
        }
        Ok(())
    }
}

impl Default for HaloBounds {
    fn default() -> Self {
        Self::global()
    }
}

// ── FieldConstants ────────────────────────────────────────────────────────────

/// Values fixed for the whole run and shared read-only by every float.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldConstants {
    /// Shallowest depth a float may occupy (m).
    pub surface_depth: f64,
    /// Deepest depth of the modelled domain (m).
    pub bottom_depth: f64,
    pub halo: HaloBounds,
    /// Emit per-float diagnostic events from the kernel and its handlers.
    pub verbose_events: bool,
}

impl FieldConstants {
    /// Validated constants with a global halo and quiet kernel events.
    pub fn new(surface_depth: f64, bottom_depth: f64) -> FieldResult<Self> {
        Self::with_halo(surface_depth, bottom_depth, HaloBounds::global())
    }

    pub fn with_halo(surface_depth: f64, bottom_depth: f64, halo: HaloBounds) -> FieldResult<Self> {
        if !surface_depth.is_finite() || !bottom_depth.is_finite() {
            return Err(FieldError::InvalidConstants(format!(
                "depths must be finite (surface {surface_depth}, bottom {bottom_depth})"
            )));
        }
        if surface_depth < 0.0 || bottom_depth <= surface_depth {
            return Err(FieldError::InvalidConstants(format!(
                "need 0 <= surface ({surface_depth}) < bottom ({bottom_depth})"
            )));
        }
        halo.validate()?;
        Ok(Self { surface_depth, bottom_depth, halo, verbose_events: false })
    }

    pub fn verbose(mut self, on: bool) -> Self {
        self.verbose_events = on;
        self
    }

    /// Clamp a depth into `[surface_depth, bottom_depth]`.
    #[inline]
    pub fn clamp_depth(&self, depth: f64) -> f64 {
        depth.clamp(self.surface_depth, self.bottom_depth)
    }
}
