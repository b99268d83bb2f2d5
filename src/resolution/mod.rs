//! Event resolution: rendering text and bookkeeping deaths and kills.

pub mod resolver;

pub use resolver::{EventResolver, ResolveContext, NO_OBJECT};
