//! Candidate generator configuration.

use serde::{Deserialize, Serialize};

use crate::{MatchStoreError, MatchStoreResult};

/// Tunables for synthetic buddy generation.
///
/// Score ranges are half-open: `min` is inclusive and `max` exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Lowest score for a random-mode match.
    #[serde(default = "default_random_score_min")]
    pub random_score_min: u32,

    /// Upper bound (exclusive) for a random-mode score.
    #[serde(default = "default_random_score_max")]
    pub random_score_max: u32,

    /// Lowest score for a manual-mode candidate.
    #[serde(default = "default_manual_score_min")]
    pub manual_score_min: u32,

    /// Upper bound (exclusive) for a manual-mode score.
    #[serde(default = "default_manual_score_max")]
    pub manual_score_max: u32,

    /// Number of candidates offered in manual mode.
    #[serde(default = "default_manual_option_count")]
    pub manual_option_count: usize,

    /// Chance that a manual-mode candidate is anonymous.
    #[serde(default = "default_manual_anonymous_chance")]
    pub manual_anonymous_chance: f64,

    /// Keep the anonymous sentinel out of name draws.
    #[serde(default = "default_exclude_sentinel")]
    pub exclude_sentinel_from_draws: bool,
}

fn default_random_score_min() -> u32 {
    70
}

fn default_random_score_max() -> u32 {
    100
}

fn default_manual_score_min() -> u32 {
    75
}

fn default_manual_score_max() -> u32 {
    100
}

fn default_manual_option_count() -> usize {
    6
}

fn default_manual_anonymous_chance() -> f64 {
    0.3
}

fn default_exclude_sentinel() -> bool {
    true
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            random_score_min: default_random_score_min(),
            random_score_max: default_random_score_max(),
            manual_score_min: default_manual_score_min(),
            manual_score_max: default_manual_score_max(),
            manual_option_count: default_manual_option_count(),
            manual_anonymous_chance: default_manual_anonymous_chance(),
            exclude_sentinel_from_draws: default_exclude_sentinel(),
        }
    }
}

impl GeneratorConfig {
    /// Checks ranges and probabilities.
    pub fn validate(&self) -> MatchStoreResult<()> {
        if self.random_score_min >= self.random_score_max {
            return Err(MatchStoreError::InvalidScoreRange {
                mode: "random",
                min: self.random_score_min,
                max: self.random_score_max,
            });
        }
        if self.manual_score_min >= self.manual_score_max {
            return Err(MatchStoreError::InvalidScoreRange {
                mode: "manual",
                min: self.manual_score_min,
                max: self.manual_score_max,
            });
        }
        if self.manual_option_count == 0 {
            return Err(MatchStoreError::ZeroOptionCount);
        }
        if !(0.0..=1.0).contains(&self.manual_anonymous_chance) {
            return Err(MatchStoreError::InvalidProbability {
                name: "manual_anonymous_chance",
                value: self.manual_anonymous_chance,
            });
        }
        Ok(())
    }
}
