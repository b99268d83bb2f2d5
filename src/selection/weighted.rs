//! Weighted template selection.
//!
//! Non-fatal templates are drawn by their base weight. Fatal templates are
//! scaled by `day_factor(ordinal) * bias * 2`, so fatal events grow more
//! common as the game goes on and as the configured bias rises.
//!
//! The bloodbath reuses the same draw with a bias derived from its
//! lethality setting (see [`bloodbath_bias`]) and a pool filtered at the
//! extremes (see [`bloodbath_pool`]).

use crate::core::SimRandom;
use crate::events::EventTemplate;

/// Ceiling of the day factor.
pub const MAX_DAY_FACTOR: f64 = 2.5;

/// Ordinal scaling applied to fatal templates.
///
/// `min(0.5 + (ordinal - 1) * 0.25, 2.5)`.
#[must_use]
pub fn day_factor(ordinal: u32) -> f64 {
    (0.5 + (f64::from(ordinal) - 1.0) * 0.25).min(MAX_DAY_FACTOR)
}

/// Map bloodbath lethality onto a selection bias.
///
/// Linear `0..=0.5 -> 0..=1`, then a steep `0.5..=1 -> 1..=100` ramp so high
/// settings let fatal templates dominate. Inputs are not clamped.
#[must_use]
pub fn bloodbath_bias(lethality: f64) -> f64 {
    if lethality <= 0.5 {
        lethality * 2.0
    } else {
        1.0 + (lethality - 0.5) * 200.0
    }
}

/// Filter a bloodbath pool at the lethality extremes.
///
/// Lethality 0 drops fatal templates. Lethality 1 drops non-fatal ones,
/// provided at least one fatal template exists.
#[must_use]
pub fn bloodbath_pool<'a>(pool: &[&'a EventTemplate], lethality: f64) -> Vec<&'a EventTemplate> {
    if lethality == 0.0 {
        pool.iter().copied().filter(|t| !t.fatal).collect()
    } else if lethality == 1.0 && pool.iter().any(|t| t.fatal) {
        pool.iter().copied().filter(|t| t.fatal).collect()
    } else {
        pool.to_vec()
    }
}

/// Picks one template from a pool with probability proportional to its
/// effective weight.
pub struct WeightedSelector;

impl WeightedSelector {
    /// Effective weight of a template at the given ordinal and bias.
    #[must_use]
    pub fn effective_weight(template: &EventTemplate, ordinal: u32, bias: f64) -> f64 {
        let base = f64::from(template.weight);
        if template.fatal {
            base * day_factor(ordinal) * (bias * 2.0)
        } else {
            base
        }
    }

    /// Select one template.
    ///
    /// Returns `None` only for an empty pool. One uniform draw is consumed
    /// otherwise; if floating point leaves the draw past the last bucket the
    /// last template is returned.
    pub fn select<'a, R: SimRandom>(
        pool: &[&'a EventTemplate],
        ordinal: u32,
        bias: f64,
        rng: &mut R,
    ) -> Option<&'a EventTemplate> {
        let last = *pool.last()?;

        let weights: Vec<f64> = pool
            .iter()
            .map(|t| Self::effective_weight(t, ordinal, bias))
            .collect();
        let total: f64 = weights.iter().sum();

        let mut threshold = rng.unit() * total;
        for (&template, &weight) in pool.iter().zip(&weights) {
            if threshold < weight {
                tracing::trace!(template = %template.id, weight, total, "selected template");
                return Some(template);
            }
            threshold -= weight;
        }

        Some(last)
    }
}
