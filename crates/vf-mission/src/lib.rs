//! `vf-mission`: what a float is told to do, and where it starts.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`mission`] | `MissionProfile` (immutable per-float parameters) + validation |
//! | [`config`]  | `FloatConfiguration` named-parameter map, `MissionParam`, TOML  |
//! | [`plan`]    | `Deployment`, `DeploymentPlan`, CSV loader, random box          |
//! | [`error`]   | `MissionError`, `MissionResult<T>`                              |
//!
//! # Cycle model (summary)
//!
//! A float repeats the same cycle until its life expectancy is spent:
//!
//! ```text
//! descend to parking_depth → drift → descend to profile_depth
//!   → ascend to surface → transmit → (next cycle)
//! ```
//!
//! The whole cycle is expected to last `cycle_duration` hours.  The drift
//! phase absorbs whatever time the vertical transits and the two-hour
//! surface transmission leave over.

pub mod config;
pub mod error;
pub mod mission;
pub mod plan;


pub use config::{FloatConfiguration, MissionParam};
pub use error::{MissionError, MissionResult};
pub use mission::{MissionProfile, TRANSMISSION_RESERVE_SECS};
pub use plan::{load_plan_csv, load_plan_reader, Deployment, DeploymentPlan};
