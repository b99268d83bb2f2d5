//! End-to-end engine behavior.
//!
//! These tests drive the public API only: build a phase, play it back,
//! finalize it, and check the roster and log bookkeeping along the way.

use std::collections::HashSet;

use arena_sim::core::{Participant, ParticipantId, Phase, PhaseKind, Roster, SimConfig, SimRng, SimulationState, TemplateId};
use arena_sim::engine::Engine;
use arena_sim::events::{EventCatalog, EventTemplate};

fn roster(n: u32) -> Roster {
    (1..=n)
        .map(|i| Participant::new(ParticipantId::new(i), format!("Tribute {}", i)))
        .collect()
}

/// A small catalog covering every phase kind with fatal and non-fatal
/// templates of varying slot counts.
fn arena_catalog() -> EventCatalog {
    let mut id = 0;
    let mut next = || {
        id += 1;
        TemplateId::new(id)
    };

    let mut templates = Vec::new();
    for kind in [PhaseKind::Bloodbath, PhaseKind::Day, PhaseKind::Night, PhaseKind::Feast] {
        templates.push(EventTemplate::new(next(), kind, "{P1} grabs a {O} and runs."));
        templates.push(EventTemplate::new(next(), kind, "{P1} and {P2} form an alliance."));
        templates.push(EventTemplate::new(next(), kind, "{P1} hides from {P2} and {P3}."));
        templates.push(EventTemplate::new(next(), kind, "{P1} stabs {P2} with a {O}.").fatal());
        templates.push(
            EventTemplate::new(next(), kind, "{P1} and {P2} ambush {P3}.")
                .fatal()
                .with_victims([3]),
        );
        templates.push(
            EventTemplate::new(next(), kind, "{P1} sets a trap that kills {P2} and {P3}.")
                .fatal()
                .with_victims([2, 3]),
        );
        templates.push(
            EventTemplate::new(next(), kind, "{P1} eats poisonous berries.")
                .fatal()
                .with_victims([1])
                .with_weight(2),
        );
    }
    EventCatalog::from_templates(templates)
}

#[test]
fn test_alive_count_drops_by_unique_deaths() {
    let engine = Engine::new(arena_catalog(), SimConfig::default());
    let mut rng = SimRng::new(2024);
    let mut state = engine.start(roster(24)).unwrap();

    for _ in 0..40 {
        let before = state.roster().alive_count();
        state = engine.next_phase(&state, &mut rng).unwrap();
        if state.is_finished() {
            break;
        }

        state = state.skip().unwrap().finalize_phase().unwrap();
        let record = state.log().last().unwrap();

        let unique: HashSet<_> = record.deaths.iter().copied().collect();
        assert_eq!(unique.len(), record.deaths.len(), "participant died twice");
        assert_eq!(state.roster().alive_count(), before - unique.len());
    }
}

#[test]
fn test_finished_iff_at_most_one_alive() {
    let engine = Engine::new(arena_catalog(), SimConfig::default().with_death_rate(0.9));
    let mut rng = SimRng::new(77);
    let mut state = engine.start(roster(12)).unwrap();

    for _ in 0..200 {
        state = engine.next_phase(&state, &mut rng).unwrap();
        if state.is_finished() {
            break;
        }
        assert!(state.roster().alive_count() >= 2);
        state = state.skip().unwrap().finalize_phase().unwrap();
    }

    assert!(state.is_finished());
    assert!(state.roster().alive_count() <= 1);
    assert_eq!(state.winner(), state.roster().sole_survivor());
}

#[test]
fn test_kill_counts_match_log() {
    let engine = Engine::new(arena_catalog(), SimConfig::default());
    let mut rng = SimRng::new(5);
    let mut state = engine.start(roster(16)).unwrap();

    while !state.is_finished() && state.log().len() < 200 {
        state = engine.next_phase(&state, &mut rng).unwrap();
        if state.phase().is_active() {
            state = state.skip().unwrap().finalize_phase().unwrap();
        }
    }

    let tally = state.log().kill_tally();
    for participant in state.roster().iter() {
        let expected = tally.get(&participant.id).copied().unwrap_or(0);
        assert_eq!(participant.kills, expected, "{}", participant.name);
    }

    let total_kills: u32 = tally.values().sum();
    let credited_deaths: usize = state
        .log()
        .events()
        .filter(|e| e.killer.is_some())
        .map(|e| e.deaths.len())
        .sum();
    assert_eq!(total_kills as usize, credited_deaths);
}

#[test]
fn test_no_participant_in_two_events_of_a_batch() {
    let engine = Engine::new(arena_catalog(), SimConfig::default());
    let mut rng = SimRng::new(31);
    let mut state = engine.start(roster(20)).unwrap();

    for _ in 0..12 {
        state = engine.next_phase(&state, &mut rng).unwrap();
        if state.is_finished() {
            break;
        }

        let mut seen = HashSet::new();
        for event in state.pending().iter() {
            for id in &event.participants {
                assert!(seen.insert(*id), "{} appears twice in one batch", id);
            }
        }

        state = state.skip().unwrap().finalize_phase().unwrap();
    }
}

#[test]
fn test_bloodbath_lethality_extremes() {
    let catalog = arena_catalog();

    let engine = Engine::new(catalog.clone(), SimConfig::default().with_bloodbath_lethality(0.0));
    let state = engine.start(roster(12)).unwrap();
    let state = engine.next_phase(&state, &mut SimRng::new(1)).unwrap();
    assert_eq!(state.phase(), Phase::Bloodbath);
    assert!(!state.pending().is_empty());
    for event in state.pending().iter() {
        assert!(event.bloodbath);
        assert!(!catalog.get(event.template).unwrap().fatal);
        assert!(event.deaths.is_empty());
    }

    let engine = Engine::new(catalog.clone(), SimConfig::default().with_bloodbath_lethality(1.0));
    let state = engine.start(roster(12)).unwrap();
    let state = engine.next_phase(&state, &mut SimRng::new(1)).unwrap();
    assert!(!state.pending().is_empty());
    for event in state.pending().iter() {
        assert!(catalog.get(event.template).unwrap().fatal);
    }
}

#[test]
fn test_bloodbath_ignores_earlier_history() {
    let catalog = EventCatalog::from_templates([EventTemplate::new(
        TemplateId::new(1),
        PhaseKind::Bloodbath,
        "{P1} sprints for the cornucopia.",
    )]);
    let engine = Engine::new(catalog, SimConfig::default());

    let mut r = roster(3);
    for participant in 1..=3 {
        r.record_use(ParticipantId::new(participant), TemplateId::new(1));
    }
    let state = engine.next_phase(&SimulationState::new(r), &mut SimRng::new(4)).unwrap();

    assert_eq!(state.remaining(), 3);
    assert!(state.pending().iter().all(|e| e.template == TemplateId::new(1)));
}

#[test]
fn test_scenario_sole_survivor_finishes_immediately() {
    let engine = Engine::new(arena_catalog(), SimConfig::default());
    let mut r = roster(2);
    r.mark_dead(ParticipantId::new(2));

    let state = engine
        .next_phase(&SimulationState::new(r), &mut SimRng::new(1))
        .unwrap();

    assert_eq!(state.phase(), Phase::Finished);
    assert_eq!(state.winner(), Some(ParticipantId::new(1)));
    assert!(state.pending().is_empty());
    assert!(state.log().is_empty());
}

#[test]
fn test_scenario_heavy_fatal_template_dominates() {
    let catalog = EventCatalog::from_templates([
        EventTemplate::new(TemplateId::new(1), PhaseKind::Day, "{P1} is stung by tracker jackers.")
            .fatal()
            .with_weight(10),
        EventTemplate::new(TemplateId::new(2), PhaseKind::Day, "{P1} and {P2} share a meal.").with_weight(1),
    ]);
    let engine = Engine::new(catalog, SimConfig::default().with_bloodbath(false));

    let mut fatal = 0;
    let mut total = 0;
    for seed in 0..200 {
        let state = engine.start(roster(4)).unwrap();
        let state = engine.next_phase(&state, &mut SimRng::new(seed)).unwrap();
        assert_eq!(state.phase(), Phase::Day);

        for event in state.pending().iter() {
            total += 1;
            if event.template == TemplateId::new(1) {
                fatal += 1;
            }
        }
    }

    assert!(fatal * 10 > total * 6, "fatal template chosen {} of {}", fatal, total);
}

#[test]
fn test_scenario_feast_routing() {
    let engine = Engine::new(
        arena_catalog(),
        SimConfig::default()
            .with_bloodbath(false)
            .with_feast_frequency(3)
            .with_death_rate(0.0),
    );
    let mut rng = SimRng::new(9);
    let mut state = engine.start(roster(6)).unwrap();

    let mut after_day = Vec::new();
    while after_day.len() < 3 {
        state = engine.next_phase(&state, &mut rng).unwrap();
        let phase = state.phase();
        state = state.skip().unwrap().finalize_phase().unwrap();

        if phase == Phase::Day {
            let day = state.ordinal();
            state = engine.next_phase(&state, &mut rng).unwrap();
            after_day.push((day, state.phase()));
            state = state.skip().unwrap().finalize_phase().unwrap();
        }
    }

    assert_eq!(
        after_day,
        vec![(1, Phase::Night), (2, Phase::Night), (3, Phase::Feast)]
    );
}

#[test]
fn test_scenario_unmatchable_template_falls_back() {
    let catalog = EventCatalog::from_templates([EventTemplate::new(
        TemplateId::new(1),
        PhaseKind::Day,
        "{P1} trades supplies with {P2}.",
    )]);
    let engine = Engine::new(catalog, SimConfig::default().with_bloodbath(false));

    let mut r = roster(2);
    r.record_use(ParticipantId::new(2), TemplateId::new(1));

    let state = engine
        .next_phase(&SimulationState::new(r), &mut SimRng::new(3))
        .unwrap();

    assert_eq!(state.phase(), Phase::Day);
    assert_eq!(state.remaining(), 2);
    for event in state.pending().iter() {
        assert!(event.template.is_fallback());
        assert_eq!(event.participants.len(), 1);
        assert!(event.text.ends_with("looks around nervously."));
    }
}

#[test]
fn test_stepwise_playback_matches_skip() {
    let engine = Engine::new(arena_catalog(), SimConfig::default());
    let state = engine.start(roster(10)).unwrap();
    let built = engine.next_phase(&state, &mut SimRng::new(12)).unwrap();

    let mut stepped = built.clone();
    while stepped.remaining() > 0 {
        stepped = stepped.apply_next().unwrap();
    }
    let skipped = built.skip().unwrap();

    assert_eq!(stepped, skipped);
    assert_eq!(
        stepped.finalize_phase().unwrap().log(),
        skipped.finalize_phase().unwrap().log()
    );
}

#[test]
fn test_chronicle_and_statistics() {
    let engine = Engine::new(arena_catalog(), SimConfig::default().with_death_rate(0.8));
    let mut rng = SimRng::new(8);
    let mut state = engine.start(roster(10)).unwrap();

    while !state.is_finished() && state.log().len() < 200 {
        state = engine.next_phase(&state, &mut rng).unwrap();
        if state.phase().is_active() {
            state = state.skip().unwrap().finalize_phase().unwrap();
        }
    }

    let chronicle = state.log().chronicle(state.roster());
    assert_eq!(chronicle.len(), state.log().len());
    let fallen: usize = chronicle.iter().map(|c| c.fallen.len()).sum();
    assert_eq!(fallen, state.log().deaths_in_order().len());
    assert_eq!(fallen, 10 - state.roster().alive_count());

    let leaders = state.roster().leaderboard();
    assert!(leaders.windows(2).all(|w| w[0].kills >= w[1].kills));
    assert!(leaders.iter().all(|p| p.kills > 0));
}
