//! Phase orchestration.
//!
//! - `batch`: builds one phase's events on a working copy of the roster
//! - `orchestrator`: the `Engine` state machine
//! - `simulation`: a stateful driver with observer callbacks

pub mod batch;
pub mod orchestrator;
pub mod simulation;

pub use batch::{build_batch, Batch, BatchPlan};
pub use orchestrator::Engine;
pub use simulation::{NoopObserver, Simulation, SimulationObserver};
