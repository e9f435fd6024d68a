//! `vf-field`: the read-only environment floats move through.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`constants`]  | `FieldConstants`, `HaloBounds`                            |
//! | [`provider`]   | `FieldProvider` trait                                     |
//! | [`bathymetry`] | `Bathymetry` sources: flat, regular grid, R-tree soundings |
//! | [`ocean`]      | `OceanField`, the stock `FieldProvider`                   |
//! | [`error`]      | `FieldError`, `FieldResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on constant types.         |
//!
//! Depths are positive downward, in metres.  Field data is built once during
//! setup and only read while the simulation steps, so every provider must be
//! `Send + Sync`.

pub mod bathymetry;
pub mod constants;
pub mod error;
pub mod ocean;
pub mod provider;


pub use bathymetry::{
    load_soundings_csv, load_soundings_reader, Bathymetry, BathymetryGrid, BathymetryPoints,
};
pub use constants::{FieldConstants, HaloBounds};
pub use error::{FieldError, FieldResult};
pub use ocean::OceanField;
pub use provider::FieldProvider;
