//! Phase records and the append-only simulation log.
//!
//! Records are plain serializable data so that export/import collaborators
//! can persist a log and rebuild it without any engine type beyond these.

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{ParticipantId, PhaseKind, Roster};
use crate::events::ResolvedEvent;

/// One completed phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRecord {
    /// Kind of phase.
    pub kind: PhaseKind,

    /// Phase ordinal (0 for the bloodbath, the day number otherwise).
    pub ordinal: u32,

    /// Events in playback order.
    pub events: Vec<ResolvedEvent>,

    /// Every death in the phase, in event order.
    pub deaths: Vec<ParticipantId>,
}

impl PhaseRecord {
    /// Build a record, flattening the deaths of its events.
    #[must_use]
    pub fn new(kind: PhaseKind, ordinal: u32, events: Vec<ResolvedEvent>) -> Self {
        let deaths = events
            .iter()
            .flat_map(|e| e.deaths.iter().copied())
            .collect();
        Self {
            kind,
            ordinal,
            events,
            deaths,
        }
    }
}

/// Summary-ready view of one phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChronicleEntry {
    pub kind: PhaseKind,
    pub ordinal: u32,
    /// Event texts in order.
    pub lines: Vec<String>,
    /// Names of the fallen, in order of death.
    pub fallen: Vec<String>,
}

/// Append-only record of resolved phases.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationLog {
    records: Vector<PhaseRecord>,
}

impl SimulationLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed phase.
    pub fn push(&mut self, record: PhaseRecord) {
        self.records.push_back(record);
    }

    /// Number of recorded phases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Is the log empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in order.
    pub fn iter(&self) -> impl Iterator<Item = &PhaseRecord> {
        self.records.iter()
    }

    /// Most recent record.
    #[must_use]
    pub fn last(&self) -> Option<&PhaseRecord> {
        self.records.last()
    }

    /// Kind of the most recent phase.
    #[must_use]
    pub fn last_kind(&self) -> Option<PhaseKind> {
        self.last().map(|r| r.kind)
    }

    /// Every resolved event across all phases.
    pub fn events(&self) -> impl Iterator<Item = &ResolvedEvent> {
        self.records.iter().flat_map(|r| r.events.iter())
    }

    /// Every death, in the order it happened.
    #[must_use]
    pub fn deaths_in_order(&self) -> Vec<ParticipantId> {
        self.records
            .iter()
            .flat_map(|r| r.deaths.iter().copied())
            .collect()
    }

    /// Kills per credited killer, recomputed from the events.
    #[must_use]
    pub fn kill_tally(&self) -> BTreeMap<ParticipantId, u32> {
        let mut tally = BTreeMap::new();
        for event in self.events() {
            if let Some(killer) = event.killer {
                *tally.entry(killer).or_insert(0) += event.kill_credit();
            }
        }
        tally
    }

    /// Per-phase texts and fallen names for summary collaborators.
    ///
    /// Unknown ids are skipped in the fallen list.
    #[must_use]
    pub fn chronicle(&self, roster: &Roster) -> Vec<ChronicleEntry> {
        self.records
            .iter()
            .map(|r| ChronicleEntry {
                kind: r.kind,
                ordinal: r.ordinal,
                lines: r.events.iter().map(|e| e.text.clone()).collect(),
                fallen: r
                    .deaths
                    .iter()
                    .filter_map(|&id| roster.name(id))
                    .map(str::to_string)
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EventId, Participant, TemplateId};
    use crate::events::SlotList;

    fn pid(raw: u32) -> ParticipantId {
        ParticipantId::new(raw)
    }

    fn event(id: u64, participants: &[u32], deaths: &[u32], killer: Option<u32>) -> ResolvedEvent {
        ResolvedEvent {
            id: EventId::new(id),
            text: format!("event {}", id),
            participants: participants.iter().copied().map(pid).collect::<SlotList>(),
            deaths: deaths.iter().copied().map(pid).collect::<SlotList>(),
            killer: killer.map(pid),
            template: TemplateId::new(1),
            bloodbath: false,
        }
    }

    fn sample_log() -> SimulationLog {
        let mut log = SimulationLog::new();
        log.push(PhaseRecord::new(
            PhaseKind::Bloodbath,
            0,
            vec![event(0, &[1, 2], &[2], Some(1)), event(1, &[3], &[], None)],
        ));
        log.push(PhaseRecord::new(
            PhaseKind::Day,
            1,
            vec![event(2, &[3, 1, 4], &[1, 4], Some(3))],
        ));
        log
    }

    #[test]
    fn test_record_flattens_deaths() {
        let log = sample_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log.iter().next().unwrap().deaths, vec![pid(2)]);
        assert_eq!(log.deaths_in_order(), vec![pid(2), pid(1), pid(4)]);
        assert_eq!(log.last_kind(), Some(PhaseKind::Day));
    }

    #[test]
    fn test_kill_tally() {
        let tally = sample_log().kill_tally();
        assert_eq!(tally.get(&pid(1)), Some(&1));
        assert_eq!(tally.get(&pid(3)), Some(&2));
        assert_eq!(tally.get(&pid(2)), None);
    }

    #[test]
    fn test_chronicle() {
        let roster: Roster = (1..=4)
            .map(|i| Participant::new(pid(i), format!("T{}", i)))
            .collect();

        let chronicle = sample_log().chronicle(&roster);

        assert_eq!(chronicle.len(), 2);
        assert_eq!(chronicle[0].lines, vec!["event 0", "event 1"]);
        assert_eq!(chronicle[1].fallen, vec!["T1", "T4"]);
        assert_eq!(chronicle[1].ordinal, 1);
    }

    #[test]
    fn test_serialization() {
        let log = sample_log();
        let json = serde_json::to_string(&log).unwrap();
        let deserialized: SimulationLog = serde_json::from_str(&json).unwrap();
        assert_eq!(log, deserialized);
    }
}
