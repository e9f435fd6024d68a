//! Boundary and domain handlers, run after the horizontal advection step.
//!
//! The advection engine reports a [`TransportStatus`] for its horizontal
//! move; [`resolve_vertical`] folds the kernel's proposed depth into it, and
//! [`finish_step`] then applies, in order:
//!
//! 1. Out of bounds: [`keep_in_domain`] destroys the float, or
//!    [`keep_in_column`] parks it just above the local sea floor, as the
//!    [`OutOfBoundsPolicy`] says.
//! 2. [`keep_in_water`]: through the surface pins the float to the surface.
//! 3. The periodic wrap, when the domain topology asks for one.

use tracing::{debug, warn};

use vf_agent::FloatState;
use vf_core::{GeoPoint, TransportStatus};
use vf_field::{FieldConstants, FieldProvider, HaloBounds};

use crate::{DestroyReason, KernelContext};

// ── Topology ──────────────────────────────────────────────────────────────────

/// How the edges of the horizontal domain behave.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum DomainTopology {
    /// Floats that leave the domain are lost.
    #[default]
    Bounded,
    /// Floats that leave the domain re-enter on the opposite side.
    Periodic(PeriodicBoundary),
}

/// What to do with a float whose move ends out of bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum OutOfBoundsPolicy {
    /// Remove the float from the fleet.
    #[default]
    Delete,
    /// Keep the float at its last position, [`COLUMN_RECOVERY_OFFSET_M`]
    /// above the sea floor, and let the cycle kernel carry on from there.
    KeepInColumn,
}

/// Boundary handlers selected for a run.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct BoundaryHandlers {
    pub topology:      DomainTopology,
    pub out_of_bounds: OutOfBoundsPolicy,
}

/// Height above the sea floor at which [`keep_in_column`] places a float.
pub const COLUMN_RECOVERY_OFFSET_M: f64 = 10.0;

/// Latitude handling for [`PeriodicBoundary`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum LatitudeWrap {
    /// Reference behaviour: floats leaving through the south edge re-enter
    /// from the north, but floats leaving through the north edge are not
    /// moved.  A warning is logged when `verbose_events` is set.
    #[default]
    AsObserved,
    /// Wrap through both the south and the north edge.
    Symmetric,
}

/// Periodic wrap against the halo bounds.
///
/// A float beyond an edge is shifted by one domain width (or height) toward
/// the opposite edge.  The shift is applied once per step, which covers any
/// move shorter than the domain itself.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PeriodicBoundary {
    pub halo:     HaloBounds,
    pub latitude: LatitudeWrap,
}

impl PeriodicBoundary {
    pub fn new(halo: HaloBounds) -> Self {
        Self { halo, latitude: LatitudeWrap::AsObserved }
    }

    pub fn symmetric(halo: HaloBounds) -> Self {
        Self { halo, latitude: LatitudeWrap::Symmetric }
    }

    /// Wrapped position of `pos`.
    pub fn wrap(&self, pos: GeoPoint, ctx: &KernelContext) -> GeoPoint {
        let h = &self.halo;
        let mut out = pos;

        if pos.lon < h.west {
            out.lon += h.lon_width();
        } else if pos.lon > h.east {
            out.lon -= h.lon_width();
        }

        if pos.lat < h.south {
            out.lat += h.lat_height();
        } else if pos.lat > h.north {
            match self.latitude {
                LatitudeWrap::Symmetric => out.lat -= h.lat_height(),
                LatitudeWrap::AsObserved if ctx.verbose() => {
                    warn!(
                        float = %ctx.float,
                        lat = pos.lat,
                        north = h.north,
                        "float north of the periodic halo is not wrapped"
                    );
                }
                LatitudeWrap::AsObserved => {}
            }
        }

        if ctx.verbose() && out != pos {
            debug!(float = %ctx.float, from = %pos, to = %out, "periodic wrap");
        }
        out
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// Fold the proposed depth into the horizontal transport status.
///
/// A horizontal error wins.  Otherwise a depth above the surface is
/// `ErrorThroughSurface` and a depth below the domain bottom is
/// `ErrorOutOfBounds`.
pub fn resolve_vertical(
    next_depth: f64,
    horizontal: TransportStatus,
    constants:  &FieldConstants,
) -> TransportStatus {
    if !horizontal.is_success() {
        return horizontal;
    }
    if next_depth < constants.surface_depth {
        TransportStatus::ErrorThroughSurface
    } else if next_depth > constants.bottom_depth {
        TransportStatus::ErrorOutOfBounds
    } else {
        TransportStatus::Success
    }
}

/// `ErrorOutOfBounds` is unrecoverable: the float must be destroyed.
pub fn keep_in_domain(status: TransportStatus, ctx: &KernelContext) -> Option<DestroyReason> {
    if status != TransportStatus::ErrorOutOfBounds {
        return None;
    }
    if ctx.verbose() {
        warn!(float = %ctx.float, "float out of the domain, deleted");
    }
    Some(DestroyReason::OutOfDomain)
}

/// `ErrorOutOfBounds` is recovered in place: the float stays where it was
/// before the move, `COLUMN_RECOVERY_OFFSET_M` above the local sea floor
/// (bounded by the domain), is marked out of the water so the next grounding
/// check sees it, and the status is reset to `Success`.  Returns whether a
/// correction was made.
pub fn keep_in_column<F: FieldProvider + ?Sized>(
    state:  &mut FloatState,
    status: &mut TransportStatus,
    field:  &F,
    ctx:    &KernelContext,
) -> bool {
    if *status != TransportStatus::ErrorOutOfBounds {
        return false;
    }
    let floor = field.bathymetry(ctx.time, state.depth, state.lat, state.lon);
    let depth = ctx.constants.clamp_depth(floor - COLUMN_RECOVERY_OFFSET_M);
    if ctx.verbose() {
        warn!(
            float = %ctx.float,
            depth = state.depth,
            floor,
            "float out of bounds, kept {} m above the floor",
            COLUMN_RECOVERY_OFFSET_M
        );
    }
    state.depth = depth;
    state.in_water = false;
    *status = TransportStatus::Success;
    true
}

/// `ErrorThroughSurface` is recovered: depth is set to the surface and the
/// status reset to `Success`.  Returns whether a correction was made.
pub fn keep_in_water(
    state:  &mut FloatState,
    status: &mut TransportStatus,
    ctx:    &KernelContext,
) -> bool {
    if *status != TransportStatus::ErrorThroughSurface {
        return false;
    }
    if ctx.verbose() {
        debug!(float = %ctx.float, depth = state.depth, "float above surface, depth set to surface");
    }
    state.depth = ctx.constants.surface_depth;
    *status = TransportStatus::Success;
    true
}

// ── Composite pass ────────────────────────────────────────────────────────────

/// Result of [`finish_step`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BoundaryOutcome {
    /// State updated; carries the final transport status.
    Kept(TransportStatus),
    /// The float must be removed.  Its state is left as it was before the
    /// step's move.  Only returned under [`OutOfBoundsPolicy::Delete`] or
    /// when the cycle kernel expires the float.
    Destroy(DestroyReason),
}

/// Commit one step's move: the kernel's `next_depth` and the advection
/// engine's `moved` position and `horizontal` status.
///
/// An out-of-bounds move is never committed: the float is either destroyed
/// or recovered at its previous position.
pub fn finish_step<F: FieldProvider + ?Sized>(
    state:      &mut FloatState,
    next_depth: f64,
    moved:      GeoPoint,
    horizontal: TransportStatus,
    handlers:   &BoundaryHandlers,
    field:      &F,
    ctx:        &KernelContext,
) -> BoundaryOutcome {
    let mut status = resolve_vertical(next_depth, horizontal, &ctx.constants);
    if status == TransportStatus::ErrorOutOfBounds {
        match handlers.out_of_bounds {
            OutOfBoundsPolicy::Delete => {
                if let Some(reason) = keep_in_domain(status, ctx) {
                    return BoundaryOutcome::Destroy(reason);
                }
            }
            OutOfBoundsPolicy::KeepInColumn => {
                keep_in_column(state, &mut status, field, ctx);
            }
        }
    } else {
        state.lat = moved.lat;
        state.lon = moved.lon;
        state.depth = next_depth;
        keep_in_water(state, &mut status, ctx);
    }

    if let DomainTopology::Periodic(periodic) = &handlers.topology {
        let wrapped = periodic.wrap(GeoPoint::new(state.lat, state.lon), ctx);
        state.lat = wrapped.lat;
        state.lon = wrapped.lon;
    }

    BoundaryOutcome::Kept(status)
}
