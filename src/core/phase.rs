//! Phase kinds and the orchestrator's state labels.
//!
//! `PhaseKind` tags templates and phase records. `Phase` is the full set
//! of orchestrator states, including the transient `Summary` and the
//! pre-game and terminal states.

use serde::{Deserialize, Serialize};

/// A phase during which events are generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    /// Optional opening phase.
    Bloodbath,
    Day,
    Night,
    Feast,
}

impl PhaseKind {
    /// Orchestrator state for this kind.
    #[must_use]
    pub const fn phase(self) -> Phase {
        match self {
            PhaseKind::Bloodbath => Phase::Bloodbath,
            PhaseKind::Day => Phase::Day,
            PhaseKind::Night => Phase::Night,
            PhaseKind::Feast => Phase::Feast,
        }
    }

    /// Kind of the phase that follows a completed one.
    ///
    /// `last` is `None` before the first phase. `ordinal` is the ordinal of
    /// the completed phase; after the day with ordinal N a feast follows iff
    /// `(N - 1) % feast_frequency == feast_frequency - 1`. A zero frequency
    /// never schedules a feast.
    #[must_use]
    pub fn following(
        last: Option<PhaseKind>,
        ordinal: u32,
        feast_frequency: u32,
        bloodbath_enabled: bool,
    ) -> PhaseKind {
        match last {
            None if bloodbath_enabled => PhaseKind::Bloodbath,
            None | Some(PhaseKind::Bloodbath) | Some(PhaseKind::Night) => PhaseKind::Day,
            Some(PhaseKind::Feast) => PhaseKind::Night,
            Some(PhaseKind::Day) => {
                if feast_due(ordinal, feast_frequency) {
                    PhaseKind::Feast
                } else {
                    PhaseKind::Night
                }
            }
        }
    }
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PhaseKind::Bloodbath => "Bloodbath",
            PhaseKind::Day => "Day",
            PhaseKind::Night => "Night",
            PhaseKind::Feast => "Feast",
        };
        f.write_str(name)
    }
}

fn feast_due(day_ordinal: u32, feast_frequency: u32) -> bool {
    if feast_frequency == 0 {
        return false;
    }
    day_ordinal.saturating_sub(1) % feast_frequency == feast_frequency - 1
}

/// Orchestrator state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Before the first phase is built.
    #[default]
    Setup,
    Bloodbath,
    Day,
    Night,
    Feast,
    /// Between a finalized phase and the next one.
    Summary,
    /// Terminal: at most one participant is alive.
    Finished,
}

impl Phase {
    /// Event-generating kind, if this is an active phase.
    #[must_use]
    pub const fn kind(self) -> Option<PhaseKind> {
        match self {
            Phase::Bloodbath => Some(PhaseKind::Bloodbath),
            Phase::Day => Some(PhaseKind::Day),
            Phase::Night => Some(PhaseKind::Night),
            Phase::Feast => Some(PhaseKind::Feast),
            Phase::Setup | Phase::Summary | Phase::Finished => None,
        }
    }

    /// Is a batch being played back in this state?
    #[must_use]
    pub const fn is_active(self) -> bool {
        self.kind().is_some()
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Setup => f.write_str("Setup"),
            Phase::Summary => f.write_str("Summary"),
            Phase::Finished => f.write_str("Finished"),
            other => match other.kind() {
                Some(kind) => write!(f, "{}", kind),
                None => Ok(()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_phase() {
        assert_eq!(PhaseKind::following(None, 0, 3, true), PhaseKind::Bloodbath);
        assert_eq!(PhaseKind::following(None, 0, 3, false), PhaseKind::Day);
        assert_eq!(
            PhaseKind::following(Some(PhaseKind::Bloodbath), 0, 3, true),
            PhaseKind::Day
        );
    }

    #[test]
    fn test_feast_every_third_day() {
        let after_day = |n| PhaseKind::following(Some(PhaseKind::Day), n, 3, true);

        assert_eq!(after_day(1), PhaseKind::Night);
        assert_eq!(after_day(2), PhaseKind::Night);
        assert_eq!(after_day(3), PhaseKind::Feast);
        assert_eq!(after_day(4), PhaseKind::Night);
        assert_eq!(after_day(6), PhaseKind::Feast);
    }

    #[test]
    fn test_feast_every_day() {
        for n in 1..5 {
            assert_eq!(
                PhaseKind::following(Some(PhaseKind::Day), n, 1, true),
                PhaseKind::Feast
            );
        }
    }

    #[test]
    fn test_zero_frequency_never_feasts() {
        for n in 0..5 {
            assert_eq!(
                PhaseKind::following(Some(PhaseKind::Day), n, 0, true),
                PhaseKind::Night
            );
        }
    }

    #[test]
    fn test_cycle_after_feast_and_night() {
        assert_eq!(
            PhaseKind::following(Some(PhaseKind::Feast), 3, 3, true),
            PhaseKind::Night
        );
        assert_eq!(
            PhaseKind::following(Some(PhaseKind::Night), 3, 3, true),
            PhaseKind::Day
        );
    }

    #[test]
    fn test_phase_kind_mapping() {
        assert_eq!(Phase::Day.kind(), Some(PhaseKind::Day));
        assert_eq!(Phase::Summary.kind(), None);
        assert!(Phase::Bloodbath.is_active());
        assert!(!Phase::Finished.is_active());
        assert_eq!(PhaseKind::Feast.phase(), Phase::Feast);
        assert_eq!(format!("{}", Phase::Night), "Night");
        assert_eq!(format!("{}", Phase::Setup), "Setup");
    }
}
