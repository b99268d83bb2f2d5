//! Event catalog: all templates known to a simulation.
//!
//! The catalog is supplied once and is read-only to the engine. It keeps
//! registration order (so pools are deterministic) and hands out per-phase
//! pools, synthesizing the fallback template for phases with no entries.

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::template::EventTemplate;
use crate::core::{PhaseKind, TemplateId};

/// Registration problems.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("template {0} is already registered")]
    Duplicate(TemplateId),
    #[error("template id {0} is reserved for the built-in fallback")]
    ReservedId(TemplateId),
}

/// Registry of event templates.
///
/// ## Example
///
/// ```
/// use arena_sim::core::{PhaseKind, TemplateId};
/// use arena_sim::events::{EventCatalog, EventTemplate};
///
/// let mut catalog = EventCatalog::new();
/// catalog.register(EventTemplate::new(TemplateId::new(1), PhaseKind::Day, "{P1} hunts."));
///
/// assert_eq!(catalog.pool(PhaseKind::Day).len(), 1);
/// // No night templates: the fallback stands in.
/// assert!(catalog.pool(PhaseKind::Night)[0].id.is_fallback());
/// ```
#[derive(Clone, Debug)]
pub struct EventCatalog {
    templates: Vec<EventTemplate>,
    index: FxHashMap<TemplateId, usize>,
    fallbacks: [EventTemplate; 4],
}

impl Default for EventCatalog {
    fn default() -> Self {
        Self {
            templates: Vec::new(),
            index: FxHashMap::default(),
            fallbacks: [
                EventTemplate::fallback(PhaseKind::Bloodbath),
                EventTemplate::fallback(PhaseKind::Day),
                EventTemplate::fallback(PhaseKind::Night),
                EventTemplate::fallback(PhaseKind::Feast),
            ],
        }
    }
}

impl EventCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from templates.
    ///
    /// Panics on duplicate or reserved ids.
    #[must_use]
    pub fn from_templates(templates: impl IntoIterator<Item = EventTemplate>) -> Self {
        let mut catalog = Self::new();
        for template in templates {
            catalog.register(template);
        }
        catalog
    }

    /// Register a template.
    ///
    /// Panics if the id is already registered or reserved.
    pub fn register(&mut self, template: EventTemplate) {
        if let Err(err) = self.try_register(template) {
            panic!("{}", err);
        }
    }

    /// Register a template, reporting conflicts instead of panicking.
    pub fn try_register(&mut self, template: EventTemplate) -> Result<(), CatalogError> {
        if template.id.is_fallback() {
            return Err(CatalogError::ReservedId(template.id));
        }
        if self.index.contains_key(&template.id) {
            return Err(CatalogError::Duplicate(template.id));
        }
        self.index.insert(template.id, self.templates.len());
        self.templates.push(template);
        Ok(())
    }

    /// Get a template by id. The fallback id is not resolvable here.
    #[must_use]
    pub fn get(&self, id: TemplateId) -> Option<&EventTemplate> {
        self.index.get(&id).map(|&i| &self.templates[i])
    }

    /// Check if a template id is registered.
    #[must_use]
    pub fn contains(&self, id: TemplateId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Is the catalog empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &EventTemplate> {
        self.templates.iter()
    }

    /// Templates registered for a phase kind, in registration order.
    pub fn for_kind(&self, kind: PhaseKind) -> impl Iterator<Item = &EventTemplate> {
        self.templates.iter().filter(move |t| t.kind == kind)
    }

    /// The built-in fallback template for a phase kind.
    #[must_use]
    pub fn fallback(&self, kind: PhaseKind) -> &EventTemplate {
        let slot = match kind {
            PhaseKind::Bloodbath => 0,
            PhaseKind::Day => 1,
            PhaseKind::Night => 2,
            PhaseKind::Feast => 3,
        };
        &self.fallbacks[slot]
    }

    /// Selection pool for a phase kind.
    ///
    /// Never empty: a kind with no registered templates yields the
    /// fallback template alone.
    #[must_use]
    pub fn pool(&self, kind: PhaseKind) -> Vec<&EventTemplate> {
        let pool: Vec<_> = self.for_kind(kind).collect();
        if pool.is_empty() {
            vec![self.fallback(kind)]
        } else {
            pool
        }
    }
}
