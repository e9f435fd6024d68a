//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `VfError` as one variant
//! via `From`, so `?` works across crate boundaries.

use thiserror::Error;

/// Errors raised by `vf-core` itself.
#[derive(Debug, Error)]
pub enum VfError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `vf-core`.
pub type VfResult<T> = Result<T, VfError>;
