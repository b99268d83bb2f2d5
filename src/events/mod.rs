//! Event data: templates, the catalog, placeholder handling, and the
//! resolved events produced from them.

pub mod placeholder;
pub mod template;
pub mod catalog;
pub mod resolved;

pub use template::{EventTemplate, DEFAULT_WEIGHT, FALLBACK_TEXT};
pub use catalog::{CatalogError, EventCatalog};
pub use resolved::{ResolvedEvent, SlotList};
