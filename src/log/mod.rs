//! The simulation log and its persisted forms.
//!
//! - `PhaseRecord` / `SimulationLog`: append-only history of completed phases
//! - `SavedGame`: versioned save file for a setup and, optionally, its log

pub mod record;
pub mod snapshot;

pub use record::{ChronicleEntry, PhaseRecord, SimulationLog};
pub use snapshot::{SavedGame, SnapshotError};
