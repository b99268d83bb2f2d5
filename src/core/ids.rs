//! Identifier newtypes.
//!
//! - `ParticipantId`: an entrant in the roster
//! - `TemplateId`: an event template in the catalog
//! - `EventId`: a resolved event, allocated sequentially by the state
//!
//! All ids are opaque to the engine apart from ordering and equality.

use serde::{Deserialize, Serialize};

/// Participant identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub u32);

impl ParticipantId {
    /// Create a new participant ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Participant({})", self.0)
    }
}

/// Event template identifier.
///
/// `TemplateId::FALLBACK` is reserved for the built-in template the engine
/// synthesizes when nothing else can be matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub u32);

impl TemplateId {
    /// Reserved id of the built-in fallback template.
    pub const FALLBACK: TemplateId = TemplateId(u32::MAX);

    /// Create a new template ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Is this the reserved fallback id?
    #[must_use]
    pub const fn is_fallback(self) -> bool {
        self.0 == u32::MAX
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_fallback() {
            write!(f, "Template(fallback)")
        } else {
            write!(f, "Template({})", self.0)
        }
    }
}

/// Resolved event identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub u64);

impl EventId {
    /// Create a new event ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The id following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}
