//! `vf-agent`: float state and fleet storage.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`state`]   | `CyclePhase`, `FloatState`, `FloatStatus`                    |
//! | [`store`]   | `FleetStore` (SoA arrays), `FleetRngs` (per-float RNG)       |
//! | [`builder`] | `FleetBuilder` (validated construction from a deployment plan) |
//! | [`error`]   | `FleetError`, `FleetResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on state types.            |

pub mod builder;
pub mod error;
pub mod state;
pub mod store;


pub use builder::FleetBuilder;
pub use error::{FleetError, FleetResult};
pub use state::{CyclePhase, FloatState, FloatStatus};
pub use store::{FleetRngs, FleetStore};
