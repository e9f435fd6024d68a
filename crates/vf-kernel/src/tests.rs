//! Unit tests for vf-kernel.

use vf_agent::{CyclePhase, FloatState};
use vf_core::{FloatId, GeoPoint, TransportStatus};
use vf_field::{Bathymetry, FieldConstants, FieldProvider, OceanField};
use vf_mission::MissionProfile;

use crate::{
    finish_step, step, BoundaryHandlers, BoundaryOutcome, DestroyReason, DomainTopology,
    KernelContext, StepOutcome,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const SURFACE: f64 = 2.5;
const BOTTOM: f64 = 4_000.0;
const DT: f64 = 300.0;

fn constants() -> FieldConstants {
    FieldConstants::new(SURFACE, BOTTOM).unwrap()
}

fn ctx() -> KernelContext {
    KernelContext::new(constants(), DT, 0.0).unwrap().for_float(FloatId(0))
}

fn flat() -> OceanField {
    OceanField::flat(constants())
}

/// Sea floor at `depth` metres everywhere, inside the usual constants.
fn floor_at(depth: f64) -> OceanField {
    OceanField::new(Bathymetry::Flat(depth), constants())
}

fn float_at(phase: CyclePhase, depth: f64) -> FloatState {
    FloatState { cycle_phase: phase, ..FloatState::deployed(41.0, -12.0, depth) }
}

/// Run the kernel, expecting the float to keep going.
fn next_depth(state: &mut FloatState, mission: &MissionProfile, field: &OceanField) -> f64 {
    match step(state, mission, &ctx(), field) {
        StepOutcome::Continue { next_depth, .. } => next_depth,
        other => panic!("unexpected {other:?}"),
    }
}

/// Kernel plus boundary pass with a motionless advection engine.
fn full_step(
    state:   &mut FloatState,
    mission: &MissionProfile,
    ctx:     &KernelContext,
    field:   &OceanField,
) -> Option<DestroyReason> {
    match step(state, mission, ctx, field) {
        StepOutcome::Destroy(reason) => Some(reason),
        StepOutcome::Continue { next_depth, .. } => {
            let here = GeoPoint::new(state.lat, state.lon);
            match finish_step(
                state,
                next_depth,
                here,
                TransportStatus::Success,
                &BoundaryHandlers::default(),
                field,
                ctx,
            ) {
                BoundaryOutcome::Kept(_) => None,
                BoundaryOutcome::Destroy(reason) => Some(reason),
            }
        }
    }
}

// ── Drift time ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod drift_time {
    use super::*;
    use crate::{drift_time_secs, effective_depths, Grounding, GroundingCheck};

    #[test]
    fn reference_mission() {
        // transit = 3995 / 0.09 ≈ 44 388.9 s; 864 000 − 44 388.9 − 7 200 ≈ 812 411.1 s.
        let t = drift_time_secs(&MissionProfile::default(), SURFACE, 1_000.0, 2_000.0, DT);
        assert_eq!(t, 812_400.0);
    }

    #[test]
    fn floored_to_timestep() {
        let t = drift_time_secs(&MissionProfile::default(), SURFACE, 1_000.0, 2_000.0, 3_600.0);
        assert_eq!(t, 810_000.0);
        assert_eq!(t % 3_600.0, 0.0);
    }

    #[test]
    fn depths_capped_by_bottom() {
        let c = FieldConstants::new(SURFACE, 1_500.0).unwrap();
        let s = float_at(CyclePhase::Drift, 1_000.0);
        let (drift, profile) =
            effective_depths(&s, &MissionProfile::default(), &c, &GroundingCheck::AFLOAT);
        assert_eq!(drift, 1_000.0);
        assert_eq!(profile, 1_500.0);
    }

    #[test]
    fn grounding_overrides_depths() {
        let s = float_at(CyclePhase::Drift, 800.0);
        let m = MissionProfile::default();
        let rise = GroundingCheck { grounding: Grounding::DuringDescentOrDrift, delta: -50.0 };
        assert_eq!(effective_depths(&s, &m, &constants(), &rise).0, 750.0);

        let profile = GroundingCheck { grounding: Grounding::DuringProfileDescent, delta: 0.0 };
        assert_eq!(effective_depths(&s, &m, &constants(), &profile).1, 800.0);
    }
}

// ── Cycle phases ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod cycle {
    use super::*;

    #[test]
    fn first_descent_step() {
        let mut s = FloatState::deployed(41.0, -12.0, SURFACE);
        let d = next_depth(&mut s, &MissionProfile::default(), &flat());
        assert_eq!(d, SURFACE + 27.0);
        assert_eq!(s.cycle_phase, CyclePhase::InitDescend);
        assert_eq!(s.cycle_age, DT);
    }

    #[test]
    fn descent_lands_exactly_on_parking() {
        let mut s = float_at(CyclePhase::InitDescend, 990.0);
        let d = next_depth(&mut s, &MissionProfile::default(), &flat());
        assert_eq!(d, 1_000.0);
        assert_eq!(s.cycle_phase, CyclePhase::InitDescend);
    }

    #[test]
    fn parking_depth_starts_drift() {
        let mut s = float_at(CyclePhase::InitDescend, 1_000.0);
        s.drift_age = 12_345.0;
        let d = next_depth(&mut s, &MissionProfile::default(), &flat());
        assert_eq!(d, 1_000.0);
        assert_eq!(s.cycle_phase, CyclePhase::Drift);
        // Reset at the transition, then one step of drift.
        assert_eq!(s.drift_age, DT);
    }

    #[test]
    fn drift_holds_depth() {
        let mut s = float_at(CyclePhase::Drift, 1_000.0);
        let d = next_depth(&mut s, &MissionProfile::default(), &flat());
        assert_eq!(d, 1_000.0);
        assert_eq!(s.drift_age, DT);
    }

    #[test]
    fn drift_ends_and_descent_begins_same_step() {
        let mut s = float_at(CyclePhase::Drift, 1_000.0);
        s.drift_age = 812_400.0 - DT;
        let d = next_depth(&mut s, &MissionProfile::default(), &flat());
        assert_eq!(s.cycle_phase, CyclePhase::ProfileDescend);
        assert_eq!(s.drift_age, 0.0);
        assert_eq!(d, 1_027.0);
    }

    #[test]
    fn profile_descent_clamped() {
        let mut s = float_at(CyclePhase::ProfileDescend, 1_990.0);
        let d = next_depth(&mut s, &MissionProfile::default(), &flat());
        assert_eq!(d, 2_000.0);
        assert_eq!(s.cycle_phase, CyclePhase::ProfileDescend);
    }

    #[test]
    fn profile_depth_starts_ascent_same_step() {
        let mut s = float_at(CyclePhase::ProfileDescend, 2_000.0);
        let d = next_depth(&mut s, &MissionProfile::default(), &flat());
        assert_eq!(s.cycle_phase, CyclePhase::ProfileAscend);
        assert_eq!(d, 1_973.0);
    }

    #[test]
    fn profile_capped_by_shallow_bottom() {
        let field = OceanField::flat(FieldConstants::new(SURFACE, 1_500.0).unwrap());
        let ctx = KernelContext::new(*field.constants(), DT, 0.0).unwrap();
        let mut s = float_at(CyclePhase::ProfileDescend, 1_490.0);
        match step(&mut s, &MissionProfile::default(), &ctx, &field) {
            StepOutcome::Continue { next_depth, .. } => assert_eq!(next_depth, 1_500.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn ascent_reaches_surface() {
        let mut s = float_at(CyclePhase::ProfileAscend, 20.0);
        let d = next_depth(&mut s, &MissionProfile::default(), &flat());
        assert_eq!(d, SURFACE);
        assert_eq!(s.cycle_phase, CyclePhase::Transmit);
    }

    #[test]
    fn transmit_holds_until_cycle_ends() {
        let mut s = float_at(CyclePhase::Transmit, SURFACE);
        s.cycle_age = 1_000.0;
        let d = next_depth(&mut s, &MissionProfile::default(), &flat());
        assert_eq!(d, SURFACE);
        assert_eq!(s.cycle_phase, CyclePhase::Transmit);
        assert_eq!(s.cycle_age, 1_300.0);
    }

    #[test]
    fn cycle_end_starts_next_descent() {
        let mut s = float_at(CyclePhase::Transmit, SURFACE);
        s.cycle_age = 864_000.0;
        let d = next_depth(&mut s, &MissionProfile::default(), &flat());
        assert_eq!(s.cycle_phase, CyclePhase::InitDescend);
        assert_eq!(s.cycle_number, 2);
        assert_eq!(s.cycle_age, DT);
        assert_eq!(d, SURFACE + 27.0);
    }

    #[test]
    fn life_expectancy_destroys() {
        let mission = MissionProfile { life_expectancy: 1, ..MissionProfile::default() };
        let mut s = float_at(CyclePhase::Transmit, SURFACE);
        s.cycle_age = 864_000.0;
        let out = step(&mut s, &mission, &ctx(), &flat());
        assert_eq!(out, StepOutcome::Destroy(DestroyReason::LifeExpectancy));
        assert_eq!(s.cycle_number, 2);
        assert_eq!(s.cycle_age, 0.0);
    }
}

// ── Grounding ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod grounding {
    use super::*;
    use crate::{Grounding, GROUNDING_RISE_M};

    #[test]
    fn afloat_marks_in_water() {
        let mut s = float_at(CyclePhase::Drift, 1_000.0);
        s.in_water = false;
        match step(&mut s, &MissionProfile::default(), &ctx(), &flat()) {
            StepOutcome::Continue { grounding, .. } => assert_eq!(grounding, Grounding::Afloat),
            other => panic!("unexpected {other:?}"),
        }
        assert!(s.in_water);
    }

    #[test]
    fn descent_grounding_rises_and_drifts() {
        let mut s = float_at(CyclePhase::InitDescend, 510.0);
        s.drift_age = 99.0;
        match step(&mut s, &MissionProfile::default(), &ctx(), &floor_at(500.0)) {
            StepOutcome::Continue { next_depth, grounding } => {
                assert_eq!(grounding, Grounding::DuringDescentOrDrift);
                assert_eq!(next_depth, 510.0 - GROUNDING_RISE_M);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(!s.in_water);
        assert_eq!(s.cycle_phase, CyclePhase::Drift);
        assert_eq!(s.drift_age, DT);
    }

    #[test]
    fn drift_grounding_keeps_drift_age() {
        let mut s = float_at(CyclePhase::Drift, 510.0);
        s.drift_age = 3_000.0;
        let d = next_depth(&mut s, &MissionProfile::default(), &floor_at(500.0));
        assert_eq!(d, 460.0);
        assert_eq!(s.cycle_phase, CyclePhase::Drift);
        assert_eq!(s.drift_age, 3_000.0 + DT);
    }

    #[test]
    fn rise_bounded_by_surface() {
        let mut s = float_at(CyclePhase::Drift, 20.0);
        let d = next_depth(&mut s, &MissionProfile::default(), &floor_at(10.0));
        assert_eq!(d, SURFACE);
    }

    #[test]
    fn profile_descent_grounding_starts_ascent() {
        let mut s = float_at(CyclePhase::ProfileDescend, 1_510.0);
        match step(&mut s, &MissionProfile::default(), &ctx(), &floor_at(1_500.0)) {
            StepOutcome::Continue { next_depth, grounding } => {
                assert_eq!(grounding, Grounding::DuringProfileDescent);
                assert_eq!(next_depth, 1_483.0);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(s.cycle_phase, CyclePhase::ProfileAscend);
    }

    #[test]
    fn rising_float_ignored() {
        let mut s = float_at(CyclePhase::ProfileAscend, 1_510.0);
        match step(&mut s, &MissionProfile::default(), &ctx(), &floor_at(1_500.0)) {
            StepOutcome::Continue { next_depth, grounding } => {
                assert_eq!(grounding, Grounding::Ignored);
                assert_eq!(next_depth, 1_483.0);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(s.cycle_phase, CyclePhase::ProfileAscend);
    }
}

// ── Boundary handlers ─────────────────────────────────────────────────────────

#[cfg(test)]
mod boundary {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use vf_field::HaloBounds;

    use crate::{
        keep_in_column, keep_in_domain, keep_in_water, resolve_vertical, OutOfBoundsPolicy,
        PeriodicBoundary, COLUMN_RECOVERY_OFFSET_M,
    };

    fn halo() -> HaloBounds {
        HaloBounds::new(-12.0, -8.0, 40.0, 46.0)
    }

    fn periodic(halo: HaloBounds) -> BoundaryHandlers {
        BoundaryHandlers {
            topology: DomainTopology::Periodic(PeriodicBoundary::new(halo)),
            ..BoundaryHandlers::default()
        }
    }

    fn column_kept() -> BoundaryHandlers {
        BoundaryHandlers {
            out_of_bounds: OutOfBoundsPolicy::KeepInColumn,
            ..BoundaryHandlers::default()
        }
    }

    /// Counts the events emitted on the current thread.
    struct EventCounter(Arc<AtomicUsize>);

    impl tracing::Subscriber for EventCounter {
        fn enabled(&self, _: &tracing::Metadata<'_>) -> bool {
            true
        }
        fn new_span(&self, _: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            tracing::span::Id::from_u64(1)
        }
        fn record(&self, _: &tracing::span::Id, _: &tracing::span::Record<'_>) {}
        fn record_follows_from(&self, _: &tracing::span::Id, _: &tracing::span::Id) {}
        fn event(&self, _: &tracing::Event<'_>) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
        fn enter(&self, _: &tracing::span::Id) {}
        fn exit(&self, _: &tracing::span::Id) {}
    }

    fn events_during(f: impl FnOnce()) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        tracing::subscriber::with_default(EventCounter(Arc::clone(&count)), f);
        count.load(Ordering::Relaxed)
    }

    #[test]
    fn vertical_status() {
        let c = constants();
        assert_eq!(resolve_vertical(1.0, TransportStatus::Success, &c), TransportStatus::ErrorThroughSurface);
        assert_eq!(resolve_vertical(4_001.0, TransportStatus::Success, &c), TransportStatus::ErrorOutOfBounds);
        assert_eq!(resolve_vertical(SURFACE, TransportStatus::Success, &c), TransportStatus::Success);
        assert_eq!(
            resolve_vertical(1.0, TransportStatus::ErrorOutOfBounds, &c),
            TransportStatus::ErrorOutOfBounds
        );
    }

    #[test]
    fn out_of_bounds_destroys() {
        assert_eq!(
            keep_in_domain(TransportStatus::ErrorOutOfBounds, &ctx()),
            Some(DestroyReason::OutOfDomain)
        );
        assert_eq!(keep_in_domain(TransportStatus::ErrorThroughSurface, &ctx()), None);
    }

    #[test]
    fn through_surface_pins_to_surface() {
        let mut s = float_at(CyclePhase::ProfileAscend, -4.0);
        let mut status = TransportStatus::ErrorThroughSurface;
        assert!(keep_in_water(&mut s, &mut status, &ctx()));
        assert_eq!(s.depth, SURFACE);
        assert_eq!(status, TransportStatus::Success);

        assert!(!keep_in_water(&mut s, &mut status, &ctx()));
    }

    #[test]
    fn finish_step_recovers_surface_in_same_step() {
        let mut s = float_at(CyclePhase::ProfileAscend, 10.0);
        let moved = GeoPoint::new(41.1, -12.1);
        let handlers = BoundaryHandlers::default();
        let out = finish_step(&mut s, -3.0, moved, TransportStatus::Success, &handlers, &flat(), &ctx());
        assert_eq!(out, BoundaryOutcome::Kept(TransportStatus::Success));
        assert_eq!(s.depth, SURFACE);
        assert_eq!(s.lat, 41.1);
        assert_eq!(s.lon, -12.1);
    }

    #[test]
    fn finish_step_out_of_domain_leaves_state() {
        let mut s = float_at(CyclePhase::Drift, 1_000.0);
        let before = s;
        let out = finish_step(
            &mut s,
            1_000.0,
            GeoPoint::new(80.0, 0.0),
            TransportStatus::ErrorOutOfBounds,
            &BoundaryHandlers::default(),
            &flat(),
            &ctx(),
        );
        assert_eq!(out, BoundaryOutcome::Destroy(DestroyReason::OutOfDomain));
        assert_eq!(s, before);
    }

    #[test]
    fn column_keeps_float_above_floor() {
        let mut s = float_at(CyclePhase::Drift, 1_000.0);
        let mut status = TransportStatus::ErrorOutOfBounds;
        assert!(keep_in_column(&mut s, &mut status, &floor_at(1_500.0), &ctx()));
        assert_eq!(s.depth, 1_500.0 - COLUMN_RECOVERY_OFFSET_M);
        assert!(!s.in_water);
        assert_eq!(status, TransportStatus::Success);

        assert!(!keep_in_column(&mut s, &mut status, &floor_at(1_500.0), &ctx()));
    }

    #[test]
    fn column_depth_bounded_by_domain() {
        let mut s = float_at(CyclePhase::ProfileDescend, 3_995.0);
        let mut status = TransportStatus::ErrorOutOfBounds;
        keep_in_column(&mut s, &mut status, &floor_at(6_000.0), &ctx());
        assert_eq!(s.depth, BOTTOM);
    }

    #[test]
    fn finish_step_keeps_out_of_bounds_float_in_column() {
        let mut s = float_at(CyclePhase::Drift, 1_000.0);
        let out = finish_step(
            &mut s,
            1_000.0,
            GeoPoint::new(80.0, 0.0),
            TransportStatus::ErrorOutOfBounds,
            &column_kept(),
            &floor_at(2_000.0),
            &ctx(),
        );
        assert_eq!(out, BoundaryOutcome::Kept(TransportStatus::Success));
        assert_eq!((s.lat, s.lon), (41.0, -12.0));
        assert_eq!(s.depth, 2_000.0 - COLUMN_RECOVERY_OFFSET_M);
        assert!(!s.in_water);
    }

    #[test]
    fn finish_step_keeps_float_below_bottom_in_column() {
        let mut s = float_at(CyclePhase::ProfileDescend, 3_900.0);
        let out = finish_step(
            &mut s,
            4_100.0,
            GeoPoint::new(41.0, -12.0),
            TransportStatus::Success,
            &column_kept(),
            &flat(),
            &ctx(),
        );
        assert_eq!(out, BoundaryOutcome::Kept(TransportStatus::Success));
        assert_eq!(s.depth, BOTTOM - COLUMN_RECOVERY_OFFSET_M);
    }

    #[test]
    fn periodic_wraps_longitude() {
        let p = PeriodicBoundary::new(halo());
        assert_eq!(p.wrap(GeoPoint::new(43.0, -7.5), &ctx()).lon, -11.5);
        assert_eq!(p.wrap(GeoPoint::new(43.0, -12.5), &ctx()).lon, -8.5);
        assert_eq!(p.wrap(GeoPoint::new(43.0, -10.0), &ctx()), GeoPoint::new(43.0, -10.0));
    }

    #[test]
    fn periodic_south_wraps_north_left_as_observed() {
        let p = PeriodicBoundary::new(halo());
        assert_eq!(p.wrap(GeoPoint::new(39.5, -10.0), &ctx()).lat, 45.5);
        assert_eq!(p.wrap(GeoPoint::new(46.5, -10.0), &ctx()).lat, 46.5);
    }

    #[test]
    fn north_overflow_warning_follows_verbose_flag() {
        let p = PeriodicBoundary::new(halo());
        let north = GeoPoint::new(46.5, -10.0);

        let quiet = events_during(|| {
            p.wrap(north, &ctx());
        });
        assert_eq!(quiet, 0);

        let verbose_ctx = KernelContext::new(constants().verbose(true), DT, 0.0)
            .unwrap()
            .for_float(FloatId(0));
        let loud = events_during(|| {
            p.wrap(north, &verbose_ctx);
        });
        assert_eq!(loud, 1);
    }

    #[test]
    fn periodic_symmetric_wraps_north() {
        let p = PeriodicBoundary::symmetric(halo());
        assert_eq!(p.wrap(GeoPoint::new(46.5, -10.0), &ctx()).lat, 40.5);
    }

    #[test]
    fn finish_step_applies_periodic_topology() {
        let mut s = float_at(CyclePhase::Drift, 1_000.0);
        let out = finish_step(
            &mut s,
            1_000.0,
            GeoPoint::new(43.0, -7.0),
            TransportStatus::Success,
            &periodic(halo()),
            &flat(),
            &ctx(),
        );
        assert_eq!(out, BoundaryOutcome::Kept(TransportStatus::Success));
        assert_eq!(s.lon, -11.0);
    }
}

// ── Whole-life properties ─────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use super::*;
    use crate::drift_time_secs;

    /// Short mission so several full cycles run quickly: 4 h cycles, one
    /// minute steps, 6 m per step.
    fn short_mission() -> MissionProfile {
        MissionProfile {
            parking_depth:   100.0,
            profile_depth:   200.0,
            vertical_speed:  0.1,
            cycle_duration:  4.0,
            life_expectancy: 3,
        }
    }

    #[test]
    fn invariants_hold_over_a_whole_life() {
        let mission = short_mission();
        let dt = 60.0;
        let field = flat();
        let c = *field.constants();
        let ctx = KernelContext::new(c, dt, 0.0).unwrap().for_float(FloatId(3));
        let drift_time = drift_time_secs(&mission, SURFACE, 100.0, 200.0, dt);
        assert_eq!(drift_time, 3_240.0);

        let mut s = FloatState::deployed(41.0, -12.0, SURFACE);
        let mut destroyed = None;
        let mut drift_steps = 0u32;
        let mut completed_cycles = 0u32;

        for _ in 0..10_000 {
            let before = s;
            if let Some(reason) = full_step(&mut s, &mission, &ctx, &field) {
                destroyed = Some(reason);
                break;
            }

            assert!(s.cycle_phase.as_u8() <= 4);
            assert!(s.depth >= c.surface_depth && s.depth <= c.bottom_depth, "depth {}", s.depth);

            // 0 → 1 only from exactly the parking depth, with a fresh drift age.
            if before.cycle_phase == CyclePhase::InitDescend && s.cycle_phase == CyclePhase::Drift {
                assert_eq!(before.depth, mission.parking_depth);
                assert_eq!(s.drift_age, dt);
            }

            // cycle_number and cycle_age change together, at 4 → 0 only.
            if s.cycle_number != before.cycle_number {
                assert_eq!(s.cycle_number, before.cycle_number + 1);
                assert_eq!(before.cycle_phase, CyclePhase::Transmit);
                assert_eq!(s.cycle_phase, CyclePhase::InitDescend);
                assert_eq!(s.cycle_age, dt);
                assert!((drift_steps as f64 * dt - drift_time).abs() <= dt);
                drift_steps = 0;
                completed_cycles += 1;
            } else {
                assert_eq!(s.cycle_age, before.cycle_age + dt);
            }

            if s.cycle_phase == CyclePhase::Drift {
                drift_steps += 1;
            }
        }

        assert_eq!(destroyed, Some(DestroyReason::LifeExpectancy));
        assert_eq!(completed_cycles, 2);
        assert_eq!(s.cycle_number, 4);
    }
}
