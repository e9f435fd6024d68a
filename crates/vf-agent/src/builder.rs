//! Validated construction of `FleetStore` + `FleetRngs` from a deployment plan.
//!
//! # Usage
//!
//! ```rust
//! use vf_agent::FleetBuilder;
//! use vf_core::{GeoPoint, SimClock, SimRng};
//! use vf_field::{FieldConstants, OceanField};
//! use vf_mission::{DeploymentPlan, MissionProfile};
//!
//! let field = OceanField::flat(FieldConstants::new(2.5, 4_000.0).unwrap());
//! let plan  = DeploymentPlan::random_box(
//!     GeoPoint::new(44.0, -10.25), 6.0, 3.5, 20, 2.5, 0, &mut SimRng::new(1),
//! );
//!
//! let (store, rngs) = FleetBuilder::new(&plan, /*seed=*/ 42)
//!     .mission(MissionProfile::default())
//!     .build(&field, &SimClock::new(0, 300))
//!     .unwrap();
//!
//! assert_eq!(store.count, 20);
//! assert_eq!(rngs.len(),  20);
//! ```

use tracing::warn;

use vf_core::{FloatId, SimClock};
use vf_field::FieldProvider;
use vf_mission::{Deployment, DeploymentPlan, FloatConfiguration, MissionProfile};

use crate::{FleetError, FleetResult, FleetRngs, FleetStore, FloatState};

enum Missions {
    Shared(MissionProfile),
    PerFloat(Vec<MissionProfile>),
}

/// Builder for [`FleetStore`] + [`FleetRngs`].
///
/// Every mission is validated against the field's surface and bottom depths
/// and every deployment against the field's domain.  A float that fails is
/// built with status [`FloatStatus::Rejected`](crate::FloatStatus::Rejected) and its error is kept in
/// [`FleetStore::rejections`]; the rest of the fleet deploys as planned.
///
/// Only fleet-wide problems (a mission list of the wrong length, too many
/// floats) fail the build.
pub struct FleetBuilder<'a> {
    plan:     &'a DeploymentPlan,
    seed:     u64,
    missions: Missions,
}

impl<'a> FleetBuilder<'a> {
    /// One float per deployment, all flying the default mission until told
    /// otherwise.
    pub fn new(plan: &'a DeploymentPlan, seed: u64) -> Self {
        Self {
            plan,
            seed,
            missions: Missions::Shared(MissionProfile::default()),
        }
    }

    /// Every float flies `mission`.
    pub fn mission(mut self, mission: MissionProfile) -> Self {
        self.missions = Missions::Shared(mission);
        self
    }

    /// Every float flies the mission described by `config`.
    pub fn configuration(self, config: &FloatConfiguration) -> Self {
        self.mission(config.to_mission())
    }

    /// One mission per deployment, in plan order.
    pub fn missions(mut self, missions: Vec<MissionProfile>) -> Self {
        self.missions = Missions::PerFloat(missions);
        self
    }

    /// Validate and construct the fleet.
    ///
    /// Deployment times are converted to ticks on `clock`, rounding up; a
    /// deployment before the clock's start lands on tick 0.
    pub fn build<F: FieldProvider + ?Sized>(
        self,
        field: &F,
        clock: &SimClock,
    ) -> FleetResult<(FleetStore, FleetRngs)> {
        let count = self.plan.len();
        if u32::try_from(count).map_or(true, |n| n == u32::MAX) {
            return Err(FleetError::TooManyFloats(count));
        }

        let missions = match self.missions {
            Missions::Shared(m) => vec![m; count],
            Missions::PerFloat(v) if v.len() == count => v,
            Missions::PerFloat(v) => {
                return Err(FleetError::MissionCount { missions: v.len(), floats: count });
            }
        };

        let mut state = Vec::with_capacity(count);
        let mut deploy_tick = Vec::with_capacity(count);
        let mut rejected = Vec::new();

        for (i, (d, m)) in self.plan.iter().zip(&missions).enumerate() {
            let float = FloatId(i as u32);
            if let Err(e) = check_deployment(float, d, m, field) {
                rejected.push((float, e));
            }
            state.push(FloatState::deployed(d.lat, d.lon, d.depth));
            deploy_tick.push(clock.tick_at_or_after(d.time_unix_secs));
        }

        let mut store = FleetStore::new(state, missions, deploy_tick);
        for (float, error) in rejected {
            warn!(%float, %error, "float rejected at deployment");
            store.reject(float, error);
        }
        let rngs = FleetRngs::new(count, self.seed);
        Ok((store, rngs))
    }
}

/// Checks that only concern one float: its mission and where it enters the
/// water.
fn check_deployment<F: FieldProvider + ?Sized>(
    float:      FloatId,
    deployment: &Deployment,
    mission:    &MissionProfile,
    field:      &F,
) -> FleetResult<()> {
    let c = field.constants();
    mission
        .validate(c.surface_depth, c.bottom_depth)
        .map_err(|source| FleetError::Mission { float, source })?;

    let d = deployment;
    if !(c.surface_depth..=c.bottom_depth).contains(&d.depth) {
        return Err(FleetError::DeploymentDepth {
            float,
            depth:   d.depth,
            surface: c.surface_depth,
            bottom:  c.bottom_depth,
        });
    }
    if !field.contains(d.lat, d.lon) {
        return Err(FleetError::DeploymentPosition { float, lat: d.lat, lon: d.lon });
    }
    Ok(())
}
