use thiserror::Error;

#[derive(Debug, Error)]
pub enum KernelError {
    #[error("timestep must be a positive number of seconds, got {0}")]
    InvalidTimestep(f64),

    #[error("kernel time must be finite, got {0}")]
    InvalidTime(f64),
}

pub type KernelResult<T> = Result<T, KernelError>;
