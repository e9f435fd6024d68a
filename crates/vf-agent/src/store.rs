//! Fleet storage: `FleetStore` (SoA data) and `FleetRngs` (per-float RNG).
//!
//! The parallel step needs `&mut` access to each float's state and RNG while
//! missions stay shared, so the RNGs live in their own struct and the step
//! zips `state.par_iter_mut()` with `rngs.inner.par_iter_mut()`.
//!
//! Floats are never removed from the arrays.  An expired, lost or rejected
//! float keeps its index and its last state; only `status` changes.

use vf_core::{FloatId, FloatRng, Tick};
use vf_mission::MissionProfile;

use crate::{FleetError, FleetResult, FloatState, FloatStatus};

// ── FleetRngs ─────────────────────────────────────────────────────────────────

/// Per-float deterministic RNG state, one per float, indexed by `FloatId`.
pub struct FleetRngs {
    pub inner: Vec<FloatRng>,
}

impl FleetRngs {
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| FloatRng::new(global_seed, FloatId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, float: FloatId) -> &mut FloatRng {
        &mut self.inner[float.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── FleetStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for the whole fleet.
///
/// Every `Vec` has exactly `count` elements and `FloatId` indexes all of
/// them.  `FloatState` is kept as one record per float because the kernel
/// rewrites all of it together every step.
pub struct FleetStore {
    pub count: usize,

    /// Cycle state and position.
    pub state: Vec<FloatState>,

    /// Mission each float flies; fixed after deployment.
    pub mission: Vec<MissionProfile>,

    pub status: Vec<FloatStatus>,

    /// Tick at which the float enters the water.
    pub deploy_tick: Vec<Tick>,

    /// Tick at which the float expired or was lost.  `None` while it is
    /// pending or active.
    pub removed_tick: Vec<Option<Tick>>,

    /// Why each rejected float failed validation, in the order the floats
    /// were rejected.
    pub rejections: Vec<FleetError>,
}

impl FleetStore {
    pub(crate) fn new(
        state:       Vec<FloatState>,
        mission:     Vec<MissionProfile>,
        deploy_tick: Vec<Tick>,
    ) -> Self {
        let count = state.len();
        debug_assert_eq!(mission.len(), count);
        debug_assert_eq!(deploy_tick.len(), count);
        Self {
            count,
            state,
            mission,
            status: vec![FloatStatus::Pending; count],
            deploy_tick,
            removed_tick: vec![None; count],
            rejections: Vec::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// All `FloatId`s in ascending index order.
    pub fn float_ids(&self) -> impl Iterator<Item = FloatId> + '_ {
        (0..self.count as u32).map(FloatId)
    }

    /// `FloatId`s of the currently active floats.
    pub fn active_ids(&self) -> impl Iterator<Item = FloatId> + '_ {
        self.float_ids().filter(|f| self.status[f.index()].is_active())
    }

    pub fn get(&self, float: FloatId) -> FleetResult<&FloatState> {
        self.state.get(float.index()).ok_or(FleetError::FloatNotFound(float))
    }

    #[inline]
    pub fn is_active(&self, float: FloatId) -> bool {
        self.status.get(float.index()).is_some_and(|s| s.is_active())
    }

    // ── Counts ────────────────────────────────────────────────────────────

    pub fn active_count(&self) -> usize {
        self.count_status(|s| s.is_active())
    }

    pub fn pending_count(&self) -> usize {
        self.count_status(|s| s == FloatStatus::Pending)
    }

    pub fn removed_count(&self) -> usize {
        self.count_status(|s| s.is_removed())
    }

    pub fn rejected_count(&self) -> usize {
        self.count_status(|s| s == FloatStatus::Rejected)
    }

    fn count_status(&self, pred: impl Fn(FloatStatus) -> bool) -> usize {
        self.status.iter().filter(|&&s| pred(s)).count()
    }

    // ── Lifecycle transitions ─────────────────────────────────────────────

    /// Activate every pending float whose deployment tick is `<= now`.
    ///
    /// Returns the floats activated by this call.
    pub fn activate_due(&mut self, now: Tick) -> Vec<FloatId> {
        let mut activated = Vec::new();
        for i in 0..self.count {
            if self.status[i] == FloatStatus::Pending && self.deploy_tick[i] <= now {
                self.status[i] = FloatStatus::Active;
                activated.push(FloatId(i as u32));
            }
        }
        activated
    }

    /// Take a pending or active float out of the fleet for good, recording
    /// `error` as the reason.
    ///
    /// Returns `false` and changes nothing if the float is unknown or has
    /// already left the fleet.  The other floats are untouched.
    pub fn reject(&mut self, float: FloatId, error: FleetError) -> bool {
        let i = float.index();
        match self.status.get(i) {
            Some(FloatStatus::Pending | FloatStatus::Active) => {}
            _ => return false,
        }
        self.status[i] = FloatStatus::Rejected;
        self.rejections.push(error);
        true
    }

    /// Move an active float to `Expired` or `Lost`.
    ///
    /// Returns `false` and changes nothing if the float is not active, so a
    /// float is removed at most once.
    pub fn remove(&mut self, float: FloatId, status: FloatStatus, now: Tick) -> bool {
        let i = float.index();
        if !self.is_active(float) || !status.is_removed() {
            return false;
        }
        self.status[i] = status;
        self.removed_tick[i] = Some(now);
        true
    }
}
