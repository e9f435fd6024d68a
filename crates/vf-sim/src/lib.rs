//! `vf-sim`: step loop driver for the virtual float fleet simulator.
//!
//! # Step loop
//!
//! ```text
//! for tick in 0..config.total_ticks (or until cancelled):
//!   ① Deploy:  pending floats whose deployment time has come go active.
//!   ② Record:  every output_interval_ticks, on_snapshot(fleet).
//!   ③ Step:    for each active float (parallel with the `parallel`
//!                feature):
//!                  vf_kernel::step → Advector::advect → finish_step
//!   ④ Remove:  in ascending FloatId order:
//!                  LifeExpectancy → Expired
//!                  OutOfDomain    → Lost (OutOfBoundsPolicy::Delete only)
//! ```
//!
//! Floats that fail validation in `FleetBuilder::build` or `SimBuilder::build`
//! are marked `Rejected` and never deploy; the rest of the fleet runs.
//!
//! Floats never see each other within a step; ③ writes only the float's own
//! state and RNG, so the parallel and sequential builds produce identical
//! results.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the float step on Rayon's thread pool.  A pool of |
//! |            | `config.num_threads` workers is built when set.         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vf_agent::FleetBuilder;
//! use vf_sim::{NoopObserver, SimBuilder, StillWater};
//!
//! let clock = config.make_clock();
//! let (fleet, rngs) = FleetBuilder::new(&plan, config.seed).build(&field, &clock)?;
//! let mut sim = SimBuilder::new(config, fleet, rngs, field, StillWater).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod advect;
pub mod builder;
pub mod cancel;
pub mod error;
pub mod observer;
pub mod sim;


pub use advect::{Advected, Advector, RandomWalk, StillWater, UniformCurrent};
pub use builder::SimBuilder;
pub use cancel::CancelToken;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, StepReport};
pub use sim::Sim;
