//! Event resolution - turning a matched template into a `ResolvedEvent`.
//!
//! The resolver renders the text, works out deaths and kill credit, and
//! applies them to the working roster copy the batch builder owns. The live
//! roster is only touched later, when the caller plays the event back.

use crate::core::{EventId, ParticipantId, Roster, SimRandom};
use crate::events::{placeholder, EventTemplate, ResolvedEvent, SlotList};

/// Substituted for `{O}` when no objects are configured.
pub const NO_OBJECT: &str = "something";

/// Inputs that don't change across one phase's batch.
#[derive(Clone, Copy, Debug)]
pub struct ResolveContext<'a> {
    /// Living participants when the batch started.
    pub alive_count: usize,
    /// Is this the bloodbath?
    pub bloodbath: bool,
    /// Names for the object placeholder.
    pub objects: &'a [String],
}

/// Resolves matched templates.
pub struct EventResolver;

impl EventResolver {
    /// Resolve `template` with `slots` filled, mutating `roster`.
    ///
    /// Victim and killer slots outside `1..=slots.len()` are ignored.
    pub fn resolve<R: SimRandom>(
        id: EventId,
        template: &EventTemplate,
        slots: &SlotList,
        context: &ResolveContext<'_>,
        roster: &mut Roster,
        rng: &mut R,
    ) -> ResolvedEvent {
        let text = Self::render(template, slots, context, roster, rng);

        let mut deaths = SlotList::new();
        let mut killer = None;

        if template.fatal {
            for slot in template.victim_slots() {
                let Some(victim) = slot_participant(slots, slot) else {
                    continue;
                };
                if deaths.contains(&victim) {
                    continue;
                }
                roster.mark_dead(victim);
                deaths.push(victim);
            }

            if let Some(candidate) = slot_participant(slots, template.killer_slot()) {
                if !deaths.is_empty() && !deaths.contains(&candidate) {
                    roster.credit_kills(candidate, deaths.len() as u32);
                    killer = Some(candidate);
                }
            }
        }

        for &participant in slots {
            roster.record_use(participant, template.id);
        }

        tracing::trace!(
            event = id.0,
            template = %template.id,
            deaths = deaths.len(),
            alive = context.alive_count,
            "resolved event"
        );

        ResolvedEvent {
            id,
            text,
            participants: slots.clone(),
            deaths,
            killer,
            template: template.id,
            bloodbath: context.bloodbath,
        }
    }

    fn render<R: SimRandom>(
        template: &EventTemplate,
        slots: &SlotList,
        context: &ResolveContext<'_>,
        roster: &Roster,
        rng: &mut R,
    ) -> String {
        let names: Vec<&str> = slots
            .iter()
            .map(|&id| roster.name(id).unwrap_or_default())
            .collect();

        let object = if context.objects.is_empty() || !placeholder::mentions_object(&template.text) {
            NO_OBJECT
        } else {
            context.objects[rng.below(context.objects.len())].as_str()
        };

        placeholder::render(&template.text, &names, object)
    }
}

fn slot_participant(slots: &SlotList, slot: u8) -> Option<ParticipantId> {
    usize::from(slot)
        .checked_sub(1)
        .and_then(|i| slots.get(i))
        .copied()
}
