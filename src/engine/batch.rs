//! Batch construction for one phase.
//!
//! Everything happens on a private working copy of the roster: the live
//! roster is untouched until the caller plays the batch back. Anchors are
//! visited in shuffled order; each anchor gets a bounded number of
//! select-and-match attempts before the fallback path is taken.

use rustc_hash::FxHashSet;

use crate::core::{EventId, ParticipantId, PhaseKind, Roster, SimRandom};
use crate::events::{EventTemplate, ResolvedEvent, SlotList};
use crate::resolution::{EventResolver, ResolveContext};
use crate::selection::{ParticipantMatcher, WeightedSelector};

/// Inputs for building one phase's batch.
#[derive(Clone, Debug)]
pub struct BatchPlan<'a> {
    pub kind: PhaseKind,
    /// Templates eligible for selection.
    pub pool: Vec<&'a EventTemplate>,
    /// Ordinal fed to the day factor.
    pub ordinal: u32,
    /// Fatal-event bias.
    pub bias: f64,
    /// Select-and-match attempts per anchor.
    pub attempts: u32,
    /// Forced for an anchor whose attempts all fail. `None` skips the anchor.
    pub fallback: Option<&'a EventTemplate>,
    pub objects: &'a [String],
}

/// A built batch and the next free event id.
#[derive(Clone, Debug)]
pub struct Batch {
    pub events: Vec<ResolvedEvent>,
    pub next_event: EventId,
}

/// Build the batch for `plan` against `roster`.
///
/// Event ids are allocated sequentially from `first_id`.
pub fn build_batch<R: SimRandom>(
    plan: &BatchPlan<'_>,
    roster: &Roster,
    first_id: EventId,
    rng: &mut R,
) -> Batch {
    let bloodbath = plan.kind == PhaseKind::Bloodbath;

    let mut working = roster.clone();
    if bloodbath {
        working.clear_history();
    }

    let mut order = working.alive_ids();
    rng.shuffle(&mut order);

    let context = ResolveContext {
        alive_count: order.len(),
        bloodbath,
        objects: plan.objects,
    };

    let mut processed: FxHashSet<ParticipantId> = FxHashSet::default();
    let mut events = Vec::new();
    let mut next_id = first_id;

    for (i, &anchor) in order.iter().enumerate() {
        if processed.contains(&anchor) {
            continue;
        }

        // Anyone who died in this batch filled a slot and is already processed.
        let available: Vec<ParticipantId> = std::iter::once(anchor)
            .chain(
                order[i + 1..]
                    .iter()
                    .copied()
                    .filter(|id| !processed.contains(id)),
            )
            .collect();

        let matched = attempt_match(plan, &available, &mut working, rng);
        let (template, slots) = match (matched, plan.fallback) {
            (Some(found), _) => found,
            (None, Some(fallback)) => {
                tracing::debug!(anchor = %anchor, kind = %plan.kind, "using fallback template");
                let slots = ParticipantMatcher::assign_anchor(fallback, anchor, &mut working);
                (fallback, slots)
            }
            (None, None) => {
                tracing::debug!(anchor = %anchor, kind = %plan.kind, "anchor skipped");
                processed.insert(anchor);
                continue;
            }
        };

        let event = EventResolver::resolve(next_id, template, &slots, &context, &mut working, rng);
        next_id = next_id.next();
        processed.extend(slots.iter().copied());
        events.push(event);
    }

    Batch {
        events,
        next_event: next_id,
    }
}

fn attempt_match<'a, R: SimRandom>(
    plan: &BatchPlan<'a>,
    available: &[ParticipantId],
    working: &mut Roster,
    rng: &mut R,
) -> Option<(&'a EventTemplate, SlotList)> {
    for attempt in 0..plan.attempts {
        let template = WeightedSelector::select(&plan.pool, plan.ordinal, plan.bias, rng)?;
        match ParticipantMatcher::assign(template, available, working) {
            Ok(slots) => return Some((template, slots)),
            Err(failure) => {
                tracing::trace!(attempt, template = %template.id, ?failure, "match failed");
            }
        }
    }
    None
}
