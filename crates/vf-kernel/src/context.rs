//! Per-step values shared by the kernel and its handlers.

use vf_core::FloatId;
use vf_field::FieldConstants;

use crate::{KernelError, KernelResult};

/// Everything the kernel needs besides the float itself.
///
/// The driver builds one per step and re-targets it per float with
/// [`for_float`](Self::for_float); it is `Copy`, so that costs nothing.
#[derive(Copy, Clone, Debug)]
pub struct KernelContext {
    pub constants: FieldConstants,
    /// Timestep, seconds.
    pub dt: f64,
    /// Unix seconds at the start of the step.
    pub time: f64,
    /// Float being stepped; only used to label diagnostic events.
    pub float: FloatId,
}

impl KernelContext {
    pub fn new(constants: FieldConstants, dt: f64, time: f64) -> KernelResult<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(KernelError::InvalidTimestep(dt));
        }
        if !time.is_finite() {
            return Err(KernelError::InvalidTime(time));
        }
        Ok(Self { constants, dt, time, float: FloatId::INVALID })
    }

    #[inline]
    pub fn for_float(mut self, float: FloatId) -> Self {
        self.float = float;
        self
    }

    #[inline]
    pub fn verbose(&self) -> bool {
        self.constants.verbose_events
    }
}
