//! Simulation configuration.
//!
//! `SimConfig` carries the knobs a game host exposes: feast cadence,
//! fatal-event bias for ordinary phases, the optional bloodbath and its
//! lethality, the object names used for `{O}` substitution, and the retry
//! ceilings for batch construction.
//!
//! The engine does not clamp `death_rate` or `bloodbath_lethality` to
//! `[0, 1]`; values outside that range extrapolate the selection formulas.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default object names for `{O}` placeholders.
pub const DEFAULT_OBJECTS: &[&str] = &[
    "sword",
    "bow",
    "spear",
    "dagger",
    "axe",
    "trap",
    "poison",
    "net",
    "arrow",
    "rock",
    "slingshot",
    "rope",
    "torch",
    "shield",
    "mace",
    "trident",
    "hatchet",
    "staff",
    "throwing knife",
    "machete",
];

/// Configuration problems reported by [`SimConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("feast_frequency must be at least 1")]
    ZeroFeastFrequency,
    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error("{field} must be at least 1")]
    ZeroAttempts { field: &'static str },
}

/// Simulation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Day count between feasts (1 = a feast after every day).
    pub feast_frequency: u32,

    /// Fatal-event bias for day, night and feast phases (nominally 0..1).
    pub death_rate: f64,

    /// Run a bloodbath before the first day.
    pub bloodbath_enabled: bool,

    /// Fatal-event bias for the bloodbath (nominally 0..1, steep above 0.5).
    pub bloodbath_lethality: f64,

    /// Names substituted for `{O}`.
    pub objects: Vec<String>,

    /// Selection attempts per anchor in ordinary phases.
    pub ordinary_attempts: u32,

    /// Selection attempts per anchor in the bloodbath.
    pub bloodbath_attempts: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            feast_frequency: 3,
            death_rate: 0.5,
            bloodbath_enabled: true,
            bloodbath_lethality: 0.8,
            objects: DEFAULT_OBJECTS.iter().map(|s| (*s).to_string()).collect(),
            ordinary_attempts: 10,
            bloodbath_attempts: 15,
        }
    }
}

impl SimConfig {
    /// Set the feast frequency.
    #[must_use]
    pub fn with_feast_frequency(mut self, frequency: u32) -> Self {
        self.feast_frequency = frequency;
        self
    }

    /// Set the ordinary-phase death rate.
    #[must_use]
    pub fn with_death_rate(mut self, rate: f64) -> Self {
        self.death_rate = rate;
        self
    }

    /// Enable or disable the bloodbath.
    #[must_use]
    pub fn with_bloodbath(mut self, enabled: bool) -> Self {
        self.bloodbath_enabled = enabled;
        self
    }

    /// Set the bloodbath lethality.
    #[must_use]
    pub fn with_bloodbath_lethality(mut self, lethality: f64) -> Self {
        self.bloodbath_lethality = lethality;
        self
    }

    /// Replace the object list.
    #[must_use]
    pub fn with_objects<I, S>(mut self, objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.objects = objects.into_iter().map(Into::into).collect();
        self
    }

    /// Check the configuration for values the engine cannot use sensibly.
    ///
    /// Out-of-range but finite rates are accepted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feast_frequency == 0 {
            return Err(ConfigError::ZeroFeastFrequency);
        }
        if !self.death_rate.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "death_rate",
                value: self.death_rate,
            });
        }
        if !self.bloodbath_lethality.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "bloodbath_lethality",
                value: self.bloodbath_lethality,
            });
        }
        if self.ordinary_attempts == 0 {
            return Err(ConfigError::ZeroAttempts {
                field: "ordinary_attempts",
            });
        }
        if self.bloodbath_attempts == 0 {
            return Err(ConfigError::ZeroAttempts {
                field: "bloodbath_attempts",
            });
        }
        Ok(())
    }
}
