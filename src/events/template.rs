//! Event templates - the immutable narrative rules events are built from.
//!
//! A template belongs to one phase kind and carries text with numbered
//! participant placeholders. Fatal templates name which slots die and
//! which slot is credited with the kills; by default slot 2 dies at the
//! hands of slot 1.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::placeholder;
use crate::core::{PhaseKind, TemplateId};

/// Weight given to templates that don't specify one.
pub const DEFAULT_WEIGHT: u32 = 5;

/// Text of the built-in fallback template.
pub const FALLBACK_TEXT: &str = "{P1} looks around nervously.";

fn default_weight() -> u32 {
    DEFAULT_WEIGHT
}

/// A reusable, weighted narrative rule.
///
/// ## Example
///
/// ```
/// use arena_sim::core::{PhaseKind, TemplateId};
/// use arena_sim::events::EventTemplate;
///
/// let ambush = EventTemplate::new(TemplateId::new(1), PhaseKind::Night, "{P1} ambushes {P2}.")
///     .fatal()
///     .with_weight(3);
///
/// assert_eq!(ambush.slot_count(), 2);
/// assert_eq!(ambush.victim_slots().as_slice(), &[2]);
/// assert_eq!(ambush.killer_slot(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTemplate {
    /// Unique identifier.
    pub id: TemplateId,

    /// Phase this template belongs to.
    pub kind: PhaseKind,

    /// Does this template kill anyone?
    #[serde(default)]
    pub fatal: bool,

    /// Relative selection weight.
    #[serde(default = "default_weight")]
    pub weight: u32,

    /// Text with `{P1}`..`{P10}` and `{O}` placeholders.
    pub text: String,

    /// Slot credited with kills (1-based). Defaults to slot 1.
    #[serde(default)]
    pub killer: Option<u8>,

    /// Slots that die (1-based). Defaults to slot 2 when empty.
    #[serde(default)]
    pub victims: SmallVec<[u8; 4]>,
}

impl EventTemplate {
    /// Create a non-fatal template with the default weight.
    #[must_use]
    pub fn new(id: TemplateId, kind: PhaseKind, text: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            fatal: false,
            weight: DEFAULT_WEIGHT,
            text: text.into(),
            killer: None,
            victims: SmallVec::new(),
        }
    }

    /// The built-in single-slot, non-fatal template for a phase.
    #[must_use]
    pub fn fallback(kind: PhaseKind) -> Self {
        Self::new(TemplateId::FALLBACK, kind, FALLBACK_TEXT).with_weight(1)
    }

    /// Mark the template fatal.
    #[must_use]
    pub fn fatal(mut self) -> Self {
        self.fatal = true;
        self
    }

    /// Set the selection weight.
    #[must_use]
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Set the killer slot.
    #[must_use]
    pub fn with_killer(mut self, slot: u8) -> Self {
        self.killer = Some(slot);
        self
    }

    /// Set the victim slots.
    #[must_use]
    pub fn with_victims(mut self, slots: impl IntoIterator<Item = u8>) -> Self {
        self.victims = slots.into_iter().collect();
        self
    }

    /// Number of participants the template needs.
    ///
    /// The highest placeholder referenced, or 1 if the text names nobody.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        usize::from(placeholder::highest_slot(&self.text).unwrap_or(1))
    }

    /// Victim slots, applying the default when none are listed.
    ///
    /// Slots are returned as written; out-of-range entries are left for
    /// the resolver to ignore.
    #[must_use]
    pub fn victim_slots(&self) -> SmallVec<[u8; 4]> {
        if !self.victims.is_empty() {
            self.victims.clone()
        } else if self.slot_count() >= 2 {
            SmallVec::from_slice(&[2])
        } else {
            SmallVec::new()
        }
    }

    /// Killer slot, applying the default.
    #[must_use]
    pub fn killer_slot(&self) -> u8 {
        self.killer.unwrap_or(1)
    }
}
