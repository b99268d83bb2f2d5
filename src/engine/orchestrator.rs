//! The phase orchestrator.
//!
//! `Engine` owns the read-only inputs (catalog and configuration) and
//! drives the state machine:
//!
//! ```text
//! Setup -> [Bloodbath] -> Day -> Night -> Day -> ... -> Finished
//!                          \-> Feast -/
//! ```
//!
//! Every active phase passes through `Summary` once finalized. From `Setup`
//! or `Summary`, [`Engine::next_phase`] either ends the game (one or no
//! participant alive) or builds the next phase's batch.
//!
//! ## Example
//!
//! ```
//! use arena_sim::core::{Participant, ParticipantId, Phase, PhaseKind, Roster, SimConfig, SimRng, TemplateId};
//! use arena_sim::engine::Engine;
//! use arena_sim::events::{EventCatalog, EventTemplate};
//!
//! let catalog = EventCatalog::from_templates([
//!     EventTemplate::new(TemplateId::new(1), PhaseKind::Day, "{P1} kills {P2}.").fatal(),
//! ]);
//! let engine = Engine::new(catalog, SimConfig::default().with_bloodbath(false));
//! let roster = Roster::new(vec![
//!     Participant::new(ParticipantId::new(1), "Cato"),
//!     Participant::new(ParticipantId::new(2), "Clove"),
//! ]);
//!
//! let mut rng = SimRng::new(42);
//! let state = engine.start(roster).unwrap();
//! let state = engine.next_phase(&state, &mut rng).unwrap();
//! assert_eq!(state.phase(), Phase::Day);
//! assert_eq!(state.remaining(), 1);
//! ```

use im::Vector;

use super::batch::{build_batch, BatchPlan};
use crate::core::{
    ConfigError, Phase, PhaseKind, Roster, SimConfig, SimRandom, SimulationState, TransitionError,
};
use crate::events::EventCatalog;
use crate::selection::{bloodbath_bias, bloodbath_pool};

/// Bloodbath selection uses the day-1 factor.
const BLOODBATH_ORDINAL: u32 = 1;

/// Phase orchestrator.
#[derive(Clone, Debug)]
pub struct Engine {
    catalog: EventCatalog,
    config: SimConfig,
}

impl Engine {
    /// Create an engine. The configuration is used as given.
    #[must_use]
    pub fn new(catalog: EventCatalog, config: SimConfig) -> Self {
        Self { catalog, config }
    }

    /// Create an engine after validating the configuration.
    pub fn validated(catalog: EventCatalog, config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(catalog, config))
    }

    #[must_use]
    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// A fresh `Setup` state.
    ///
    /// Every participant is reset to alive with no kills and no template
    /// history.
    pub fn start(&self, mut roster: Roster) -> Result<SimulationState, TransitionError> {
        if roster.len() < 2 {
            return Err(TransitionError::NotEnoughParticipants);
        }
        roster.reset_all();
        tracing::debug!(participants = roster.len(), "simulation started");
        Ok(SimulationState::new(roster))
    }

    /// Leave `Setup` or `Summary`: finish the game or build the next batch.
    pub fn next_phase<R: SimRandom>(
        &self,
        state: &SimulationState,
        rng: &mut R,
    ) -> Result<SimulationState, TransitionError> {
        if !matches!(state.phase, Phase::Setup | Phase::Summary) {
            return Err(TransitionError::InvalidPhase {
                phase: state.phase,
                operation: "build the next phase",
            });
        }

        let mut next = state.clone();

        if state.roster.alive_count() <= 1 {
            next.phase = Phase::Finished;
            next.winner = state.roster.sole_survivor();
            match next.winner_participant() {
                Some(winner) => tracing::info!(winner = %winner.name, "simulation finished"),
                None => tracing::info!("simulation finished with no survivor"),
            }
            return Ok(next);
        }

        let kind = PhaseKind::following(
            state.log.last_kind(),
            state.ordinal,
            self.config.feast_frequency,
            self.config.bloodbath_enabled,
        );
        if kind == PhaseKind::Day {
            next.ordinal += 1;
        }

        let plan = self.plan(kind, next.ordinal);
        let batch = build_batch(&plan, &state.roster, state.next_event, rng);

        tracing::debug!(
            %kind,
            ordinal = next.ordinal,
            events = batch.events.len(),
            alive = state.roster.alive_count(),
            "phase built"
        );

        next.phase = kind.phase();
        next.pending = Vector::from(batch.events);
        next.cursor = 0;
        next.next_event = batch.next_event;
        Ok(next)
    }

    fn plan(&self, kind: PhaseKind, ordinal: u32) -> BatchPlan<'_> {
        match kind {
            PhaseKind::Bloodbath => {
                let lethality = self.config.bloodbath_lethality;
                BatchPlan {
                    kind,
                    pool: bloodbath_pool(&self.catalog.pool(kind), lethality),
                    ordinal: BLOODBATH_ORDINAL,
                    bias: bloodbath_bias(lethality),
                    attempts: self.config.bloodbath_attempts,
                    fallback: None,
                    objects: &self.config.objects,
                }
            }
            PhaseKind::Day | PhaseKind::Night | PhaseKind::Feast => BatchPlan {
                kind,
                pool: self.catalog.pool(kind),
                ordinal,
                bias: self.config.death_rate,
                attempts: self.config.ordinary_attempts,
                fallback: Some(self.catalog.fallback(kind)),
                objects: &self.config.objects,
            },
        }
    }
}
