//! A stateful driver around [`Engine`].
//!
//! `Simulation` owns the engine, the current state, the generator and an
//! observer, so a host can advance the game with plain method calls and
//! react to roster changes and the final result through callbacks.

use super::orchestrator::Engine;
use crate::core::{Participant, Phase, Roster, SimRandom, SimulationState, TransitionError};
use crate::events::ResolvedEvent;
use crate::log::SimulationLog;

/// Callbacks for hosts that persist or display progress.
pub trait SimulationObserver {
    /// The live roster changed: after each step, and once after a skip that
    /// applied at least one event.
    fn on_roster_changed(&mut self, _roster: &Roster) {}

    /// The game reached `Finished`. Called once per run.
    fn on_finished(&mut self, _winner: Option<&Participant>, _log: &SimulationLog) {}
}

/// Observer that ignores every callback.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SimulationObserver for NoopObserver {}

/// Engine, state, generator and observer bundled together.
pub struct Simulation<R: SimRandom, O: SimulationObserver = NoopObserver> {
    engine: Engine,
    state: SimulationState,
    rng: R,
    observer: O,
    finished_reported: bool,
}

impl<R: SimRandom, O: SimulationObserver> Simulation<R, O> {
    /// Start a simulation over `roster`.
    pub fn new(engine: Engine, roster: Roster, rng: R, observer: O) -> Result<Self, TransitionError> {
        let state = engine.start(roster)?;
        Ok(Self {
            engine,
            state,
            rng,
            observer,
            finished_reported: false,
        })
    }

    #[must_use]
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Build the next phase, or finish the game. Returns the new phase.
    pub fn advance(&mut self) -> Result<Phase, TransitionError> {
        self.state = self.engine.next_phase(&self.state, &mut self.rng)?;
        if self.state.is_finished() && !self.finished_reported {
            self.finished_reported = true;
            self.observer
                .on_finished(self.state.winner_participant(), self.state.log());
        }
        Ok(self.state.phase())
    }

    /// Apply the next event and return it.
    pub fn step(&mut self) -> Result<ResolvedEvent, TransitionError> {
        let next = self.state.apply_next()?;
        let applied = next
            .applied()
            .last()
            .cloned()
            .ok_or(TransitionError::BatchExhausted)?;
        self.state = next;
        self.observer.on_roster_changed(self.state.roster());
        Ok(applied)
    }

    /// Apply every remaining event.
    pub fn skip(&mut self) -> Result<(), TransitionError> {
        let remaining = self.state.remaining();
        self.state = self.state.skip()?;
        if remaining > 0 {
            self.observer.on_roster_changed(self.state.roster());
        }
        Ok(())
    }

    /// Record the played-back phase.
    pub fn finalize(&mut self) -> Result<(), TransitionError> {
        self.state = self.state.finalize_phase()?;
        Ok(())
    }

    /// Throw the run away and return to `Setup` with the same participants.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        self.state = self.engine.start(self.state.roster().clone())?;
        self.finished_reported = false;
        tracing::debug!("simulation reset");
        Ok(())
    }

    /// Play phases until the game finishes or `max_phases` phases have been
    /// built. A phase already in progress is completed first and not counted.
    pub fn run_to_end(&mut self, max_phases: usize) -> Result<&SimulationState, TransitionError> {
        if self.state.phase().is_active() {
            self.skip()?;
            self.finalize()?;
        }

        let mut built = 0;
        while !self.state.is_finished() && built < max_phases {
            let phase = self.advance()?;
            if !phase.is_active() {
                continue;
            }
            built += 1;
            self.skip()?;
            self.finalize()?;
        }
        Ok(&self.state)
    }
}
