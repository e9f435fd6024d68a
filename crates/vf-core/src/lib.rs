//! `vf-core`: foundational types for the virtual float fleet simulator.
//!
//! This crate is a dependency of every other `vf-*` crate.  It has no `vf-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `FloatId`                                             |
//! | [`geo`]         | `GeoPoint`, haversine distance, metric offsets        |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `FloatRng` (per-float), `SimRng` (global)             |
//! | [`transport`]   | `TransportStatus` reported by the advection engine    |
//! | [`error`]       | `VfError`, `VfResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;
pub mod transport;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{VfError, VfResult};
pub use geo::GeoPoint;
pub use ids::FloatId;
pub use rng::{FloatRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
pub use transport::TransportStatus;
