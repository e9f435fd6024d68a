//! Fluent builder for constructing a [`Sim`].

use tracing::warn;

use vf_agent::{FleetError, FleetRngs, FleetStore, FloatStatus};
use vf_core::{FloatId, SimConfig};
use vf_field::FieldProvider;
use vf_kernel::{BoundaryHandlers, DomainTopology, OutOfBoundsPolicy};

use crate::{Advector, CancelToken, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<F, A>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, timestep, …
/// - [`FleetStore`] + [`FleetRngs`]: from [`vf_agent::FleetBuilder`]
/// - `F: FieldProvider`: bathymetry and domain constants
/// - `A: Advector`: the horizontal motion engine
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                     |
/// |----------------------|-----------------------------|
/// | `.topology(t)`       | `DomainTopology::Bounded`   |
/// | `.out_of_bounds(p)`  | `OutOfBoundsPolicy::Delete` |
/// | `.cancel_token(c)`   | A fresh, unset token        |
///
/// # Example
///
/// ```rust,ignore
/// let (fleet, rngs) = FleetBuilder::new(&plan, seed).mission(mission).build(&field, &clock)?;
/// let mut sim = SimBuilder::new(config, fleet, rngs, field, UniformCurrent::new(0.05, 0.0))
///     .topology(DomainTopology::Periodic(PeriodicBoundary::new(halo)))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<F: FieldProvider, A: Advector> {
    config:     SimConfig,
    fleet:      FleetStore,
    rngs:       FleetRngs,
    field:      F,
    advector:   A,
    boundaries: BoundaryHandlers,
    cancel:     Option<CancelToken>,
}

impl<F: FieldProvider, A: Advector> SimBuilder<F, A> {
    /// Create a builder with all required inputs.
    pub fn new(
        config:   SimConfig,
        fleet:    FleetStore,
        rngs:     FleetRngs,
        field:    F,
        advector: A,
    ) -> Self {
        Self {
            config,
            fleet,
            rngs,
            field,
            advector,
            boundaries: BoundaryHandlers::default(),
            cancel:     None,
        }
    }

    /// Select how the edges of the horizontal domain behave.
    ///
    /// With a periodic topology the field's own domain must cover the halo,
    /// otherwise the advection engine reports floats crossing an edge as out
    /// of bounds before they can be wrapped.
    pub fn topology(mut self, topology: DomainTopology) -> Self {
        self.boundaries.topology = topology;
        self
    }

    /// Choose between deleting floats that end a step out of bounds and
    /// keeping them in the water column above the local sea floor.
    pub fn out_of_bounds(mut self, policy: OutOfBoundsPolicy) -> Self {
        self.boundaries.out_of_bounds = policy;
        self
    }

    /// Share a cancel token with the simulation.  Keep a clone to stop the
    /// run from elsewhere.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    ///
    /// A float whose mission no longer validates is rejected on its own; the
    /// rest of the fleet runs.
    pub fn build(mut self) -> SimResult<Sim<F, A>> {
        self.config.validate()?;

        let count = self.fleet.count;
        for (got, what) in [
            (self.fleet.state.len(),        "float states"),
            (self.fleet.mission.len(),      "missions"),
            (self.fleet.status.len(),       "statuses"),
            (self.fleet.deploy_tick.len(),  "deployment ticks"),
            (self.fleet.removed_tick.len(), "removal ticks"),
            (self.rngs.len(),               "float RNGs"),
        ] {
            if got != count {
                return Err(SimError::FloatCountMismatch { expected: count, got, what });
            }
        }

        // Missions may have been edited after the fleet was built.
        let c = self.field.constants();
        let failed: Vec<_> = self
            .fleet
            .mission
            .iter()
            .enumerate()
            .filter(|(i, _)| self.fleet.status[*i] != FloatStatus::Rejected)
            .filter_map(|(i, mission)| {
                let float = FloatId(i as u32);
                mission
                    .validate(c.surface_depth, c.bottom_depth)
                    .err()
                    .map(|source| (float, FleetError::Mission { float, source }))
            })
            .collect();
        for (float, error) in failed {
            warn!(%float, %error, "float rejected before the run");
            self.fleet.reject(float, error);
        }

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(rayon::ThreadPoolBuilder::new().num_threads(n).build()?),
            None    => None,
        };

        Ok(Sim {
            clock:      self.config.make_clock(),
            config:     self.config,
            fleet:      self.fleet,
            rngs:       self.rngs,
            field:      self.field,
            advector:   self.advector,
            boundaries: self.boundaries,
            cancel:     self.cancel.unwrap_or_default(),
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
