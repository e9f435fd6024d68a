//! `OceanField`: a bathymetry source plus run constants.

use crate::{Bathymetry, FieldConstants, FieldProvider, HaloBounds};

/// The stock [`FieldProvider`].
///
/// With no domain set every position is inside; with one, positions outside
/// the rectangle are reported out of domain and the advection engines flag
/// them `ErrorOutOfBounds`.
pub struct OceanField {
    bathymetry: Bathymetry,
    constants:  FieldConstants,
    domain:     Option<HaloBounds>,
}

impl OceanField {
    pub fn new(bathymetry: Bathymetry, constants: FieldConstants) -> Self {
        Self { bathymetry, constants, domain: None }
    }

    /// Flat sea floor at `bottom_depth` everywhere.
    pub fn flat(constants: FieldConstants) -> Self {
        Self::new(Bathymetry::Flat(constants.bottom_depth), constants)
    }

    /// Restrict the horizontal domain to `bounds`.
    pub fn with_domain(mut self, bounds: HaloBounds) -> Self {
        self.domain = Some(bounds);
        self
    }

    /// Use the constants' halo as the horizontal domain.
    pub fn bounded_by_halo(self) -> Self {
        let halo = self.constants.halo;
        self.with_domain(halo)
    }

    pub fn domain(&self) -> Option<&HaloBounds> {
        self.domain.as_ref()
    }

    pub fn bathymetry_source(&self) -> &Bathymetry {
        &self.bathymetry
    }
}

impl FieldProvider for OceanField {
    #[inline]
    fn bathymetry(&self, _time: f64, _depth: f64, lat: f64, lon: f64) -> f64 {
        self.bathymetry.depth_at(lat, lon)
    }

    #[inline]
    fn constants(&self) -> &FieldConstants {
        &self.constants
    }

    #[inline]
    fn contains(&self, lat: f64, lon: f64) -> bool {
        self.domain.is_none_or(|d| d.contains(lat, lon))
    }
}
