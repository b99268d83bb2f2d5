//! Choosing what happens and to whom.
//!
//! - `WeightedSelector`: picks a template from a phase pool
//! - `ParticipantMatcher`: fills the chosen template's slots

pub mod weighted;
pub mod matcher;

pub use weighted::{bloodbath_bias, bloodbath_pool, day_factor, WeightedSelector};
pub use matcher::{MatchFailure, ParticipantMatcher};
