//! Field-subsystem error type.

use thiserror::Error;

/// Errors produced by `vf-field` while building field data.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("invalid field constants: {0}")]
    InvalidConstants(String),

    #[error("invalid bathymetry grid: {0}")]
    InvalidGrid(String),

    #[error("bathymetry point set is empty")]
    NoSoundings,

    #[error("sounding parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FieldResult<T> = Result<T, FieldError>;
