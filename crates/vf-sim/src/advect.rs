//! Horizontal advection engines.
//!
//! The kernel only moves floats vertically; the horizontal move of every
//! step comes from an [`Advector`].  A real deployment plugs in an engine
//! that samples a velocity field; the reference engines here cover tests and
//! demos:
//!
//! | Engine             | Move per step                                      |
//! |--------------------|----------------------------------------------------|
//! | [`StillWater`]     | none                                               |
//! | [`UniformCurrent`] | `(u·dt, v·dt)` metres east and north               |
//! | [`RandomWalk`]     | a uniform current plus diffusive noise             |
//!
//! Every engine reports `ErrorOutOfBounds` when the new position falls
//! outside the field's horizontal domain.

use vf_core::{FloatRng, GeoPoint, TransportStatus};
use vf_field::FieldProvider;

/// Result of one horizontal move.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Advected {
    pub position: GeoPoint,
    pub status:   TransportStatus,
}

impl Advected {
    /// Outcome for `position`, checked against the field's domain.
    pub fn checked(position: GeoPoint, field: &dyn FieldProvider) -> Self {
        let status = if field.contains(position.lat, position.lon) {
            TransportStatus::Success
        } else {
            TransportStatus::ErrorOutOfBounds
        };
        Self { position, status }
    }
}

/// Moves one float horizontally for one step.
///
/// Called once per active float per step, possibly from several threads at
/// once.  `depth` is the float's depth at the start of the step; `rng` is
/// the float's own stream, so stochastic engines stay reproducible whatever
/// the evaluation order.
pub trait Advector: Send + Sync {
    fn advect(
        &self,
        pos:   GeoPoint,
        depth: f64,
        time:  f64,
        dt:    f64,
        field: &dyn FieldProvider,
        rng:   &mut FloatRng,
    ) -> Advected;
}

// ── StillWater ────────────────────────────────────────────────────────────────

/// No horizontal motion.
#[derive(Copy, Clone, Debug, Default)]
pub struct StillWater;

impl Advector for StillWater {
    fn advect(
        &self,
        pos:    GeoPoint,
        _depth: f64,
        _time:  f64,
        _dt:    f64,
        field:  &dyn FieldProvider,
        _rng:   &mut FloatRng,
    ) -> Advected {
        Advected::checked(pos, field)
    }
}

// ── UniformCurrent ────────────────────────────────────────────────────────────

/// Depth-independent current, `u` eastward and `v` northward in m/s.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct UniformCurrent {
    pub u: f64,
    pub v: f64,
}

impl UniformCurrent {
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

impl Advector for UniformCurrent {
    fn advect(
        &self,
        pos:    GeoPoint,
        _depth: f64,
        _time:  f64,
        dt:     f64,
        field:  &dyn FieldProvider,
        _rng:   &mut FloatRng,
    ) -> Advected {
        Advected::checked(pos.offset_m(self.u * dt, self.v * dt), field)
    }
}

// ── RandomWalk ────────────────────────────────────────────────────────────────

/// A uniform current plus isotropic horizontal diffusion.
///
/// Each component of the step gets `sqrt(2·K·dt)` times zero-mean,
/// unit-variance noise drawn from the float's RNG.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RandomWalk {
    pub current:     UniformCurrent,
    /// Horizontal diffusivity `K`, m²/s.
    pub diffusivity: f64,
}

impl RandomWalk {
    pub fn new(u: f64, v: f64, diffusivity: f64) -> Self {
        Self { current: UniformCurrent::new(u, v), diffusivity }
    }
}

impl Advector for RandomWalk {
    fn advect(
        &self,
        pos:    GeoPoint,
        _depth: f64,
        _time:  f64,
        dt:     f64,
        field:  &dyn FieldProvider,
        rng:    &mut FloatRng,
    ) -> Advected {
        let scale = (2.0 * self.diffusivity.max(0.0) * dt).sqrt();
        let east = self.current.u * dt + scale * rng.unit_noise();
        let north = self.current.v * dt + scale * rng.unit_noise();
        Advected::checked(pos.offset_m(east, north), field)
    }
}
