//! The `Sim` struct and its step loop.

use tracing::{debug, info};

use vf_agent::{FleetRngs, FleetStore, FloatState, FloatStatus};
use vf_core::{FloatId, FloatRng, GeoPoint, SimClock, SimConfig};
use vf_field::FieldProvider;
use vf_kernel::{
    finish_step, BoundaryHandlers, BoundaryOutcome, DestroyReason, KernelContext, StepOutcome,
};
use vf_mission::MissionProfile;

use crate::{Advector, CancelToken, SimObserver, SimResult, StepReport};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<F, A>` holds the fleet, the field it swims in and the advection
/// engine, and drives the step loop:
///
/// 1. **Deploy**: pending floats whose deployment tick has come are
///    activated.
/// 2. **Record**: at recording intervals the observer sees the fleet.
/// 3. **Step** (optionally parallel with the `parallel` feature): for every
///    active float, grounding check and cycle kernel, horizontal advection,
///    then the boundary handlers.
/// 4. **Remove** (sequential, ascending `FloatId`): expired floats become
///    `Expired`, floats that left the domain become `Lost`.  Under
///    [`OutOfBoundsPolicy::KeepInColumn`][vf_kernel::OutOfBoundsPolicy] no
///    float is lost.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<F: FieldProvider, A: Advector> {
    /// Global configuration (total ticks, seed, timestep, …).
    pub config: SimConfig,

    /// Simulation clock: tracks the current tick and maps to Unix time.
    pub clock: SimClock,

    /// Fleet state (SoA arrays).
    pub fleet: FleetStore,

    /// Per-float deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: FleetRngs,

    /// Bathymetry and domain constants; read-only while stepping.
    pub field: F,

    /// Horizontal motion.
    pub advector: A,

    /// Domain topology and out-of-bounds recovery.
    pub boundaries: BoundaryHandlers,

    /// Checked between steps; see [`CancelToken`].
    pub cancel: CancelToken,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<F: FieldProvider, A: Advector> Sim<F, A> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`, or
    /// until the cancel token is set.
    ///
    /// Calls observer hooks at every step boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            floats = self.fleet.count,
            rejected = self.fleet.rejected_count(),
            start = self.clock.current_unix_secs(),
            ticks = self.config.total_ticks,
            dt = self.config.tick_duration_secs,
            "simulation started"
        );
        loop {
            if self.clock.current_tick >= self.config.end_tick() {
                break;
            }
            if self.cancel.is_cancelled() {
                info!(tick = %self.clock.current_tick, "simulation cancelled");
                break;
            }
            self.step_once(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(
            clock = %self.clock,
            active = self.fleet.active_count(),
            removed = self.fleet.removed_count(),
            pending = self.fleet.pending_count(),
            rejected = self.fleet.rejected_count(),
            "simulation finished"
        );
        Ok(())
    }

    /// Run exactly `n` steps from the current position (ignores `end_tick`
    /// and the cancel token).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step_once(observer)?;
        }
        Ok(())
    }

    // ── Core step processing ──────────────────────────────────────────────

    fn step_once<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        let unix_time_secs = self.clock.current_unix_secs();
        observer.on_step_start(now);

        // ── Phase 1: deploy ───────────────────────────────────────────────
        let deployed = self.fleet.activate_due(now).len();

        // ── Phase 2: record ───────────────────────────────────────────────
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, unix_time_secs, &self.fleet);
        }

        // ── Phase 3: step every active float ──────────────────────────────
        let removals = self.step_fleet(unix_time_secs)?;

        // ── Phase 4: apply removals ───────────────────────────────────────
        //
        // `removals` is in ascending FloatId order whichever way the step
        // ran, so observers see the same sequence in both builds.
        let mut removed = 0;
        for (float, reason) in removals {
            let status = match reason {
                DestroyReason::LifeExpectancy => FloatStatus::Expired,
                DestroyReason::OutOfDomain    => FloatStatus::Lost,
            };
            if self.fleet.remove(float, status, now) {
                removed += 1;
                observer.on_float_removed(now, float, reason);
            }
        }

        let report = StepReport {
            unix_time_secs,
            deployed,
            active: self.fleet.active_count(),
            removed,
        };
        debug!(
            tick = %now,
            deployed = report.deployed,
            active = report.active,
            removed = report.removed,
            "step"
        );
        observer.on_step_end(now, &report);

        self.clock.advance();
        Ok(())
    }

    /// Step every active float once.  Returns the floats to remove.
    fn step_fleet(&mut self, unix_time_secs: i64) -> SimResult<Vec<(FloatId, DestroyReason)>> {
        let ctx = KernelContext::new(
            *self.field.constants(),
            self.clock.dt_secs(),
            unix_time_secs as f64,
        )?;

        // Explicit field borrows so the borrow checker sees disjoint access.
        let pass = FleetPass {
            ctx,
            field:      &self.field,
            advector:   &self.advector,
            boundaries: &self.boundaries,
            status:     self.fleet.status.as_slice(),
            missions:   self.fleet.mission.as_slice(),
        };
        let states = self.fleet.state.as_mut_slice();
        let rngs = self.rngs.inner.as_mut_slice();

        #[cfg(not(feature = "parallel"))]
        {
            Ok(pass.run(states, rngs))
        }

        #[cfg(feature = "parallel")]
        {
            Ok(match &self.pool {
                Some(pool) => pool.install(|| pass.run(states, rngs)),
                None       => pass.run(states, rngs),
            })
        }
    }
}

// ── One pass over the fleet ───────────────────────────────────────────────────

/// Shared, read-only inputs of one step.
struct FleetPass<'a> {
    ctx:        KernelContext,
    field:      &'a dyn FieldProvider,
    advector:   &'a dyn Advector,
    boundaries: &'a BoundaryHandlers,
    status:     &'a [FloatStatus],
    missions:   &'a [MissionProfile],
}

impl FleetPass<'_> {
    #[cfg(not(feature = "parallel"))]
    fn run(
        &self,
        states: &mut [FloatState],
        rngs:   &mut [FloatRng],
    ) -> Vec<(FloatId, DestroyReason)> {
        states
            .iter_mut()
            .zip(rngs.iter_mut())
            .enumerate()
            .filter(|(i, _)| self.status[*i].is_active())
            .filter_map(|(i, (state, rng))| {
                let float = FloatId(i as u32);
                self.step_float(float, state, rng).map(|reason| (float, reason))
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn run(
        &self,
        states: &mut [FloatState],
        rngs:   &mut [FloatRng],
    ) -> Vec<(FloatId, DestroyReason)> {
        use rayon::prelude::*;

        // Indexed zip + ordered collect keeps the output in FloatId order.
        states
            .par_iter_mut()
            .zip(rngs.par_iter_mut())
            .enumerate()
            .filter(|(i, _)| self.status[*i].is_active())
            .filter_map(|(i, (state, rng))| {
                let float = FloatId(i as u32);
                self.step_float(float, state, rng).map(|reason| (float, reason))
            })
            .collect()
    }

    /// Kernel, advection and boundary handling for one float.
    fn step_float(
        &self,
        float: FloatId,
        state: &mut FloatState,
        rng:   &mut FloatRng,
    ) -> Option<DestroyReason> {
        let ctx = self.ctx.for_float(float);
        let mission = &self.missions[float.index()];

        let next_depth = match vf_kernel::step(state, mission, &ctx, self.field) {
            StepOutcome::Continue { next_depth, .. } => next_depth,
            StepOutcome::Destroy(reason)             => return Some(reason),
        };

        let moved = self.advector.advect(
            GeoPoint::new(state.lat, state.lon),
            state.depth,
            ctx.time,
            ctx.dt,
            self.field,
            rng,
        );

        match finish_step(
            state,
            next_depth,
            moved.position,
            moved.status,
            self.boundaries,
            self.field,
            &ctx,
        ) {
            BoundaryOutcome::Kept(_)         => None,
            BoundaryOutcome::Destroy(reason) => Some(reason),
        }
    }
}
