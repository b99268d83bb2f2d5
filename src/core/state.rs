//! Simulation state and its playback transitions.
//!
//! `SimulationState` is the single aggregate a caller owns. Transitions are
//! pure: each returns a new state and leaves the old one untouched, which
//! makes "undo", replays and discarding a run trivial. Persistent `im`
//! collections keep those copies cheap.
//!
//! Building a batch needs the catalog and configuration and lives on
//! [`crate::engine::Engine`]. Playing a batch back does not, so it lives
//! here:
//!
//! - `apply_next`: apply the event under the cursor to the live roster
//! - `skip`: apply every remaining event at once
//! - `finalize_phase`: record the played-back batch and move to `Summary`

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::{EventId, ParticipantId};
use super::participant::Participant;
use super::phase::Phase;
use super::roster::Roster;
use crate::events::ResolvedEvent;
use crate::log::{PhaseRecord, SimulationLog};

/// A transition was requested that the current state does not allow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot {operation} during {phase}")]
    InvalidPhase {
        phase: Phase,
        operation: &'static str,
    },
    #[error("every event in the batch has already been applied")]
    BatchExhausted,
    #[error("{remaining} event(s) still pending")]
    BatchPending { remaining: usize },
    #[error("a simulation needs at least two participants")]
    NotEnoughParticipants,
}

/// Everything the orchestrator tracks between calls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Current state-machine label.
    pub(crate) phase: Phase,

    /// 0 before the first day, then the current day number.
    pub(crate) ordinal: u32,

    /// Live roster; changes only as events are applied.
    pub(crate) roster: Roster,

    /// Batch built for the current phase.
    pub(crate) pending: Vector<ResolvedEvent>,

    /// Index of the next event to apply.
    pub(crate) cursor: usize,

    /// Completed phases.
    pub(crate) log: SimulationLog,

    /// Sole survivor once finished, if any.
    pub(crate) winner: Option<ParticipantId>,

    /// Next id to hand out to a resolved event.
    pub(crate) next_event: EventId,
}

impl SimulationState {
    /// A pre-game state around `roster`, used as given.
    #[must_use]
    pub fn new(roster: Roster) -> Self {
        Self {
            phase: Phase::Setup,
            ordinal: 0,
            roster,
            pending: Vector::new(),
            cursor: 0,
            log: SimulationLog::new(),
            winner: None,
            next_event: EventId::default(),
        }
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The whole batch for the current phase, applied or not.
    #[must_use]
    pub fn pending(&self) -> &Vector<ResolvedEvent> {
        &self.pending
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn log(&self) -> &SimulationLog {
        &self.log
    }

    #[must_use]
    pub fn winner(&self) -> Option<ParticipantId> {
        self.winner
    }

    /// The winning participant's record.
    #[must_use]
    pub fn winner_participant(&self) -> Option<&Participant> {
        self.winner.and_then(|id| self.roster.get(id))
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Events not yet applied.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len().saturating_sub(self.cursor)
    }

    /// The event the next `apply_next` will apply.
    #[must_use]
    pub fn next_event(&self) -> Option<&ResolvedEvent> {
        self.pending.get(self.cursor)
    }

    /// Events already applied in this phase.
    pub fn applied(&self) -> impl Iterator<Item = &ResolvedEvent> {
        self.pending.iter().take(self.cursor)
    }

    // === Playback ===

    /// Apply the event under the cursor to the live roster.
    pub fn apply_next(&self) -> Result<Self, TransitionError> {
        self.require_active("apply an event")?;
        let event = self.next_event().ok_or(TransitionError::BatchExhausted)?;

        let mut next = self.clone();
        apply_event(&mut next.roster, event);
        next.cursor += 1;
        Ok(next)
    }

    /// Apply every remaining event in order.
    pub fn skip(&self) -> Result<Self, TransitionError> {
        self.require_active("skip")?;

        let mut next = self.clone();
        for event in self.pending.iter().skip(self.cursor) {
            apply_event(&mut next.roster, event);
        }
        next.cursor = self.pending.len();
        Ok(next)
    }

    /// Record the fully applied batch and move to `Summary`.
    pub fn finalize_phase(&self) -> Result<Self, TransitionError> {
        let kind = self.phase.kind().ok_or(TransitionError::InvalidPhase {
            phase: self.phase,
            operation: "finalize",
        })?;
        let remaining = self.remaining();
        if remaining > 0 {
            return Err(TransitionError::BatchPending { remaining });
        }

        let mut next = self.clone();
        let events: Vec<_> = std::mem::take(&mut next.pending).into_iter().collect();
        tracing::debug!(%kind, ordinal = self.ordinal, events = events.len(), "phase finalized");
        next.log.push(PhaseRecord::new(kind, self.ordinal, events));
        next.phase = Phase::Summary;
        next.cursor = 0;
        Ok(next)
    }

    fn require_active(&self, operation: &'static str) -> Result<(), TransitionError> {
        if self.phase.is_active() {
            Ok(())
        } else {
            Err(TransitionError::InvalidPhase {
                phase: self.phase,
                operation,
            })
        }
    }
}

/// Apply an event's recorded effects to a roster.
pub fn apply_event(roster: &mut Roster, event: &ResolvedEvent) {
    for &victim in &event.deaths {
        roster.mark_dead(victim);
    }
    if let Some(killer) = event.killer {
        roster.credit_kills(killer, event.kill_credit());
    }
    for &participant in &event.participants {
        roster.record_use(participant, event.template);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TemplateId;

    fn pid(raw: u32) -> ParticipantId {
        ParticipantId::new(raw)
    }

    fn state_with_batch() -> SimulationState {
        let roster: Roster = (1..=3)
            .map(|i| Participant::new(pid(i), format!("T{}", i)))
            .collect();
        let mut state = SimulationState::new(roster);
        state.phase = Phase::Day;
        state.ordinal = 1;
        state.pending = Vector::from(vec![
            ResolvedEvent {
                id: EventId::new(0),
                text: "T1 kills T2".to_string(),
                participants: [pid(1), pid(2)].into_iter().collect(),
                deaths: [pid(2)].into_iter().collect(),
                killer: Some(pid(1)),
                template: TemplateId::new(5),
                bloodbath: false,
            },
            ResolvedEvent {
                id: EventId::new(1),
                text: "T3 hides".to_string(),
                participants: [pid(3)].into_iter().collect(),
                deaths: Default::default(),
                killer: None,
                template: TemplateId::new(6),
                bloodbath: false,
            },
        ]);
        state
    }

    #[test]
    fn test_new_state() {
        let state = SimulationState::new(Roster::default());
        assert_eq!(state.phase(), Phase::Setup);
        assert_eq!(state.ordinal(), 0);
        assert_eq!(state.remaining(), 0);
        assert!(state.log().is_empty());
        assert!(!state.is_finished());
    }

    #[test]
    fn test_apply_next_is_pure() {
        let state = state_with_batch();
        let next = state.apply_next().unwrap();

        assert_eq!(state.cursor(), 0);
        assert!(state.roster().is_alive(pid(2)));

        assert_eq!(next.cursor(), 1);
        assert!(!next.roster().is_alive(pid(2)));
        assert_eq!(next.roster().get(pid(1)).unwrap().kills, 1);
        assert!(next.roster().get(pid(2)).unwrap().has_used(TemplateId::new(5)));
        assert_eq!(next.applied().count(), 1);
    }

    #[test]
    fn test_apply_past_end() {
        let state = state_with_batch().skip().unwrap();
        assert_eq!(state.apply_next(), Err(TransitionError::BatchExhausted));
    }

    #[test]
    fn test_skip_matches_stepping() {
        let stepped = state_with_batch().apply_next().unwrap().apply_next().unwrap();
        let skipped = state_with_batch().skip().unwrap();

        assert_eq!(stepped, skipped);
    }

    #[test]
    fn test_skip_after_partial_playback() {
        let state = state_with_batch().apply_next().unwrap().skip().unwrap();
        assert_eq!(state.remaining(), 0);
        assert_eq!(state.roster().get(pid(1)).unwrap().kills, 1);
    }

    #[test]
    fn test_finalize_requires_exhausted_batch() {
        let state = state_with_batch();
        assert_eq!(
            state.finalize_phase(),
            Err(TransitionError::BatchPending { remaining: 2 })
        );
    }

    #[test]
    fn test_finalize_records_phase() {
        let state = state_with_batch().skip().unwrap().finalize_phase().unwrap();

        assert_eq!(state.phase(), Phase::Summary);
        assert!(state.pending().is_empty());
        assert_eq!(state.cursor(), 0);

        let record = state.log().last().unwrap();
        assert_eq!(record.ordinal, 1);
        assert_eq!(record.events.len(), 2);
        assert_eq!(record.deaths, vec![pid(2)]);
    }

    #[test]
    fn test_playback_outside_active_phase() {
        let state = SimulationState::new(Roster::default());
        assert!(matches!(
            state.apply_next(),
            Err(TransitionError::InvalidPhase { phase: Phase::Setup, .. })
        ));
        assert!(matches!(
            state.skip(),
            Err(TransitionError::InvalidPhase { .. })
        ));
        assert!(matches!(
            state.finalize_phase(),
            Err(TransitionError::InvalidPhase { .. })
        ));
    }

    #[test]
    fn test_serialization() {
        let state = state_with_batch().apply_next().unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: SimulationState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
