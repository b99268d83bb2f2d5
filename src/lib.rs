//! # arena-sim
//!
//! A deterministic, phase-driven survival simulation engine.
//!
//! A roster of participants moves through an optional bloodbath, then a
//! day/night cycle with periodic feasts. Each phase produces a batch of
//! narrative events drawn from a weighted template catalog; events can kill
//! participants and credit kills, and the game ends once one participant
//! (or none) is left alive.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: `SimulationState` is never mutated in place.
//!    Building a batch, applying an event and finalizing a phase each
//!    return a new state.
//!
//! 2. **Injected Randomness**: every draw goes through [`SimRandom`], so a
//!    seeded [`SimRng`] reproduces a run byte for byte.
//!
//! 3. **Graceful Degradation**: selection and matching never fail a phase.
//!    Bounded retries end in a built-in fallback template (ordinary phases)
//!    or a skipped anchor (bloodbath).
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) state clones via `im-rs`, so the
//!   engine can build each batch on a private working copy of the roster.
//!
//! - **Plain Serializable Records**: templates, resolved events and phase
//!   records are `serde` types; [`SavedGame`] persists them with `bincode`.
//!
//! ## Modules
//!
//! - `core`: ids, participants, roster, phases, configuration, RNG, state
//! - `events`: templates, the catalog, placeholder rendering, resolved events
//! - `selection`: weighted template selection and participant matching
//! - `resolution`: turning a matched template into a resolved event
//! - `engine`: batch construction, the phase orchestrator and a driver
//! - `log`: phase records, the simulation log and save files

pub mod core;
pub mod events;
pub mod selection;
pub mod resolution;
pub mod engine;
pub mod log;

// Re-export commonly used types
pub use crate::core::{
    EventId, ParticipantId, TemplateId,
    Participant, Roster,
    Phase, PhaseKind,
    ConfigError, SimConfig,
    SimRandom, SimRng, SimRngState,
    SimulationState, TransitionError,
};

pub use crate::events::{CatalogError, EventCatalog, EventTemplate, ResolvedEvent};

pub use crate::selection::{MatchFailure, ParticipantMatcher, WeightedSelector};

pub use crate::resolution::{EventResolver, ResolveContext};

pub use crate::engine::{Engine, NoopObserver, Simulation, SimulationObserver};

pub use crate::log::{ChronicleEntry, PhaseRecord, SavedGame, SimulationLog, SnapshotError};
