//! Core types: ids, participants, the roster, phases, configuration, RNG
//! and the simulation state.
//!
//! Nothing here knows about template selection or batch construction; the
//! engine builds on these types rather than the other way round.

pub mod ids;
pub mod participant;
pub mod roster;
pub mod phase;
pub mod config;
pub mod rng;
pub mod state;

pub use ids::{EventId, ParticipantId, TemplateId};
pub use participant::Participant;
pub use roster::{DuplicateParticipant, Roster};
pub use phase::{Phase, PhaseKind};
pub use config::{ConfigError, SimConfig, DEFAULT_OBJECTS};
pub use rng::{SimRandom, SimRng, SimRngState};
pub use state::{apply_event, SimulationState, TransitionError};
