//! Versioned save files.
//!
//! A `SavedGame` bundles everything needed to set a simulation up again:
//! the roster, the template catalog, the configuration and, optionally, the
//! log of a finished or interrupted run. Encoding is `bincode`; the version
//! is the first field so it can be checked before decoding the rest.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::record::SimulationLog;
use crate::core::{DuplicateParticipant, Participant, Roster, SimConfig};
use crate::events::{CatalogError, EventCatalog, EventTemplate};

/// Save-file problems.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode or decode save data: {0}")]
    Codec(#[from] bincode::Error),
    #[error("unsupported save version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("invalid catalog in save data: {0}")]
    Catalog(#[from] CatalogError),
    #[error("invalid roster in save data: {0}")]
    Roster(#[from] DuplicateParticipant),
}

/// Serializable save file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    /// Format version; must equal [`SavedGame::CURRENT_VERSION`].
    pub version: u32,
    pub roster: Vec<Participant>,
    pub templates: Vec<EventTemplate>,
    pub config: SimConfig,
    pub log: Option<SimulationLog>,
}

impl SavedGame {
    /// Version written by this crate.
    pub const CURRENT_VERSION: u32 = 1;

    /// Capture a setup.
    #[must_use]
    pub fn capture(roster: &Roster, catalog: &EventCatalog, config: &SimConfig) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            roster: roster.iter().cloned().collect(),
            templates: catalog.iter().cloned().collect(),
            config: config.clone(),
            log: None,
        }
    }

    /// Attach a log.
    #[must_use]
    pub fn with_log(mut self, log: SimulationLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Encode to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bytes, rejecting other versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let version: u32 = bincode::deserialize(bytes)?;
        if version != Self::CURRENT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: version,
                expected: Self::CURRENT_VERSION,
            });
        }
        Ok(bincode::deserialize(bytes)?)
    }

    /// Rebuild a fresh setup.
    ///
    /// Participants come back alive with no kills and no template history.
    pub fn restore(self) -> Result<(Roster, EventCatalog, SimConfig), SnapshotError> {
        let roster = Roster::try_new(self.roster.into_iter().map(|mut p| {
            p.reset();
            p
        }))?;

        let mut catalog = EventCatalog::new();
        for template in self.templates {
            catalog.try_register(template)?;
        }

        Ok((roster, catalog, self.config))
    }
}
