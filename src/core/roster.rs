//! The roster: every participant and their status.
//!
//! Backed by `im::Vector` so the engine can take a working copy of the
//! roster for each phase in O(1) and commit or discard it wholesale. An
//! `im::HashMap` position index keeps id lookups O(1) without giving up
//! cheap clones.

use im::{HashMap, Vector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::{ParticipantId, TemplateId};
use super::participant::Participant;

/// Two participants share an id.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("participant {0} appears more than once")]
pub struct DuplicateParticipant(pub ParticipantId);

/// Ordered collection of participants.
///
/// ## Example
///
/// ```
/// use arena_sim::core::{Participant, ParticipantId, Roster};
///
/// let roster = Roster::new(vec![
///     Participant::new(ParticipantId::new(1), "Thresh"),
///     Participant::new(ParticipantId::new(2), "Foxface"),
/// ]);
///
/// assert_eq!(roster.alive_count(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vector<Participant>", into = "Vector<Participant>")]
pub struct Roster {
    participants: Vector<Participant>,
    /// Position of each id in `participants`.
    index: HashMap<ParticipantId, usize>,
}

impl Roster {
    /// Create a roster from participants, keeping their order.
    ///
    /// Panics if two participants share an id.
    #[must_use]
    pub fn new(participants: impl IntoIterator<Item = Participant>) -> Self {
        match Self::try_new(participants) {
            Ok(roster) => roster,
            Err(DuplicateParticipant(id)) => {
                panic!("Participant with ID {:?} already in roster", id)
            }
        }
    }

    /// Create a roster, reporting a shared id instead of panicking.
    pub fn try_new(
        participants: impl IntoIterator<Item = Participant>,
    ) -> Result<Self, DuplicateParticipant> {
        let mut roster = Self::default();
        for participant in participants {
            if roster.index.contains_key(&participant.id) {
                return Err(DuplicateParticipant(participant.id));
            }
            roster.index.insert(participant.id, roster.participants.len());
            roster.participants.push_back(participant);
        }
        Ok(roster)
    }

    /// Number of participants, alive or dead.
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Is the roster empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Iterate over participants in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    /// Look up a participant.
    #[must_use]
    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        let &position = self.index.get(&id)?;
        self.participants.get(position)
    }

    /// Look up a participant mutably.
    pub fn get_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        let &position = self.index.get(&id)?;
        self.participants.get_mut(position)
    }

    /// Display name of a participant, if present.
    #[must_use]
    pub fn name(&self, id: ParticipantId) -> Option<&str> {
        self.get(id).map(|p| p.name.as_str())
    }

    // === Status ===

    /// Is the participant present and alive?
    #[must_use]
    pub fn is_alive(&self, id: ParticipantId) -> bool {
        self.get(id).is_some_and(|p| p.alive)
    }

    /// Number of living participants.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.participants.iter().filter(|p| p.alive).count()
    }

    /// Ids of living participants in roster order.
    #[must_use]
    pub fn alive_ids(&self) -> Vec<ParticipantId> {
        self.participants
            .iter()
            .filter(|p| p.alive)
            .map(|p| p.id)
            .collect()
    }

    /// The only living participant, if exactly one remains.
    #[must_use]
    pub fn sole_survivor(&self) -> Option<ParticipantId> {
        let mut alive = self.participants.iter().filter(|p| p.alive);
        match (alive.next(), alive.next()) {
            (Some(p), None) => Some(p.id),
            _ => None,
        }
    }

    // === Mutation ===

    /// Mark a participant dead.
    ///
    /// Returns true if the participant was alive.
    pub fn mark_dead(&mut self, id: ParticipantId) -> bool {
        match self.get_mut(id) {
            Some(p) if p.alive => {
                p.alive = false;
                true
            }
            _ => false,
        }
    }

    /// Add `count` kills to a participant's tally.
    pub fn credit_kills(&mut self, id: ParticipantId, count: u32) {
        if let Some(p) = self.get_mut(id) {
            p.kills += count;
        }
    }

    /// Record that a participant appeared in a template.
    pub fn record_use(&mut self, id: ParticipantId, template: TemplateId) {
        if let Some(p) = self.get_mut(id) {
            p.record_use(template);
        }
    }

    /// Reset every participant to the pre-game status.
    pub fn reset_all(&mut self) {
        for p in self.participants.iter_mut() {
            p.reset();
        }
    }

    /// Forget template history without touching alive/kill status.
    pub fn clear_history(&mut self) {
        for p in self.participants.iter_mut() {
            p.used_templates = im::OrdSet::new();
        }
    }

    // === Statistics ===

    /// Participants with at least one kill, most kills first.
    ///
    /// Ties keep roster order.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<&Participant> {
        let mut ranked: Vec<_> = self.participants.iter().filter(|p| p.kills > 0).collect();
        ranked.sort_by(|a, b| b.kills.cmp(&a.kills));
        ranked
    }

    /// Participants grouped by group tag, ascending; untagged last.
    #[must_use]
    pub fn by_group(&self) -> Vec<(Option<u32>, Vec<&Participant>)> {
        let mut groups: Vec<(Option<u32>, Vec<&Participant>)> = Vec::new();
        for p in self.participants.iter() {
            match groups.iter_mut().find(|(g, _)| *g == p.group) {
                Some((_, members)) => members.push(p),
                None => groups.push((p.group, vec![p])),
            }
        }
        groups.sort_by_key(|(g, _)| (g.is_none(), *g));
        groups
    }
}

impl TryFrom<Vector<Participant>> for Roster {
    type Error = DuplicateParticipant;

    fn try_from(participants: Vector<Participant>) -> Result<Self, Self::Error> {
        Self::try_new(participants)
    }
}

impl From<Roster> for Vector<Participant> {
    fn from(roster: Roster) -> Self {
        roster.participants
    }
}

impl FromIterator<Participant> for Roster {
    fn from_iter<I: IntoIterator<Item = Participant>>(iter: I) -> Self {
        Self::new(iter)
    }
}
