use thiserror::Error;
use vf_agent::FleetError;
use vf_core::VfError;
use vf_kernel::KernelError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Core(#[from] VfError),

    #[error("{what} length {got} does not match float count {expected}")]
    FloatCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("fleet error: {0}")]
    Fleet(#[from] FleetError),

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[cfg(feature = "parallel")]
    #[error("could not build the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type SimResult<T> = Result<T, SimError>;
