//! Participant matching: fill a template's slots from the availability pool.
//!
//! The first available participant (the anchor) always takes slot 1. The
//! remaining slots go to the next candidates in pool order that have not
//! used this template before. No participant ever repeats a template.

use crate::core::{ParticipantId, Roster};
use crate::events::{EventTemplate, SlotList};

/// Why a template could not be matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchFailure {
    /// Fewer available participants than slots.
    TooFewCandidates { needed: usize, available: usize },
    /// The anchor has already used this template.
    AnchorRepeat,
    /// Not enough other candidates without this template in their history.
    TooFewFresh { needed: usize, found: usize },
}

/// Resolves a template's slot count against the availability pool.
pub struct ParticipantMatcher;

impl ParticipantMatcher {
    /// Assign participants to every slot the template references.
    ///
    /// `available` is ordered with the anchor first. On success each filled
    /// participant has the template recorded in `roster`.
    pub fn assign(
        template: &EventTemplate,
        available: &[ParticipantId],
        roster: &mut Roster,
    ) -> Result<SlotList, MatchFailure> {
        let needed = template.slot_count();
        if available.len() < needed {
            return Err(MatchFailure::TooFewCandidates {
                needed,
                available: available.len(),
            });
        }

        let history: &Roster = roster;
        let has_used =
            |id: ParticipantId| history.get(id).is_some_and(|p| p.has_used(template.id));

        let anchor = available[0];
        if has_used(anchor) {
            return Err(MatchFailure::AnchorRepeat);
        }

        let mut slots = SlotList::new();
        slots.push(anchor);
        slots.extend(
            available[1..]
                .iter()
                .copied()
                .filter(|&id| !has_used(id))
                .take(needed - 1),
        );

        if slots.len() < needed {
            return Err(MatchFailure::TooFewFresh {
                needed: needed - 1,
                found: slots.len() - 1,
            });
        }

        for &id in &slots {
            roster.record_use(id, template.id);
        }
        Ok(slots)
    }

    /// Assign the anchor alone, ignoring template history.
    ///
    /// Used for the built-in fallback, which must always match.
    pub fn assign_anchor(
        template: &EventTemplate,
        anchor: ParticipantId,
        roster: &mut Roster,
    ) -> SlotList {
        roster.record_use(anchor, template.id);
        let mut slots = SlotList::new();
        slots.push(anchor);
        slots
    }
}
