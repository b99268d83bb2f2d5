//! Participants: entrants in the simulation and their mutable status.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use super::ids::{ParticipantId, TemplateId};

/// An entrant in the simulation.
///
/// `used_templates` is an ordered persistent set so that cloning a roster
/// is cheap and serialized output is stable across runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier.
    pub id: ParticipantId,

    /// Display name substituted into event text.
    pub name: String,

    /// Is this participant still in the game?
    pub alive: bool,

    /// Number of victims credited to this participant.
    pub kills: u32,

    /// Optional group tag (district, team, clan).
    #[serde(default)]
    pub group: Option<u32>,

    /// Templates this participant has already appeared in.
    #[serde(default)]
    pub used_templates: OrdSet<TemplateId>,
}

impl Participant {
    /// Create a living participant with no history.
    #[must_use]
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            alive: true,
            kills: 0,
            group: None,
            used_templates: OrdSet::new(),
        }
    }

    /// Set the group tag (builder pattern).
    #[must_use]
    pub fn with_group(mut self, group: u32) -> Self {
        self.group = Some(group);
        self
    }

    /// Has this participant already used the template?
    #[must_use]
    pub fn has_used(&self, template: TemplateId) -> bool {
        self.used_templates.contains(&template)
    }

    /// Record that this participant appeared in a template.
    pub fn record_use(&mut self, template: TemplateId) {
        self.used_templates.insert(template);
    }

    /// Back to the pre-game status: alive, no kills, no history.
    pub fn reset(&mut self) {
        self.alive = true;
        self.kills = 0;
        self.used_templates = OrdSet::new();
    }
}
