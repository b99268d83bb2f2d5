//! Resolved events: the concrete outcome of a template applied to
//! specific participants.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EventId, ParticipantId, TemplateId};

/// Participant list sized for the common case of 1-4 slots.
pub type SlotList = SmallVec<[ParticipantId; 4]>;

/// One narrative beat. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEvent {
    /// Sequential id allocated by the simulation state.
    pub id: EventId,

    /// Text with every placeholder substituted.
    pub text: String,

    /// Participants filling the template's slots, in slot order.
    pub participants: SlotList,

    /// Participants who died in this event.
    pub deaths: SlotList,

    /// Participant credited with the deaths, if any.
    pub killer: Option<ParticipantId>,

    /// Template this event was resolved from.
    pub template: TemplateId,

    /// Was this produced during the bloodbath?
    pub bloodbath: bool,
}

impl ResolvedEvent {
    /// Did anyone die?
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !self.deaths.is_empty()
    }

    /// Does the participant fill one of the slots?
    #[must_use]
    pub fn involves(&self, id: ParticipantId) -> bool {
        self.participants.contains(&id)
    }

    /// Kills credited to the killer by this event.
    #[must_use]
    pub fn kill_credit(&self) -> u32 {
        if self.killer.is_some() {
            self.deaths.len() as u32
        } else {
            0
        }
    }
}
