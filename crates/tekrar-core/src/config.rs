//! Scoring configuration.
//!
//! Callers copy [`ScoringConfig::default`] and override fields; nothing in
//! the pipeline reads configuration from anywhere else. Every field also
//! deserializes individually, so a config file can override any subset.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Tunable weights and time constants for the decay scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Days for a wrong answer's influence to fall to 1/e.
    #[serde(default = "default_tau_wrong_days")]
    pub tau_wrong_days: f64,
    /// Right-answer time constant for items without a matching tag below.
    #[serde(default = "default_tau_right_default_days")]
    pub tau_right_default_days: f64,
    /// Per-tag right-answer time constants. High-frequency words are
    /// forgiven faster: their successes stop shielding them sooner.
    #[serde(default = "default_tau_right_by_tag")]
    pub tau_right_by_tag: HashMap<String, f64>,
    /// Weight of the wrong-answer accumulator in the final score.
    #[serde(default = "default_weight_wrong")]
    pub weight_wrong: f64,
    /// Weight of the right-answer accumulator in the final score.
    #[serde(default = "default_weight_right")]
    pub weight_right: f64,
    /// Score floor for items with little or no history.
    #[serde(default = "default_novelty_bonus")]
    pub novelty_bonus: f64,
}

fn default_tau_wrong_days() -> f64 {
    21.0
}

fn default_tau_right_default_days() -> f64 {
    7.0
}

fn default_tau_right_by_tag() -> HashMap<String, f64> {
    HashMap::from([
        ("freq-100".to_string(), 3.0),
        ("freq-500".to_string(), 5.0),
        ("freq-1000".to_string(), 8.0),
    ])
}

fn default_weight_wrong() -> f64 {
    1.5
}

fn default_weight_right() -> f64 {
    1.0
}

fn default_novelty_bonus() -> f64 {
    1.0
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tau_wrong_days: default_tau_wrong_days(),
            tau_right_default_days: default_tau_right_default_days(),
            tau_right_by_tag: default_tau_right_by_tag(),
            weight_wrong: default_weight_wrong(),
            weight_right: default_weight_right(),
            novelty_bonus: default_novelty_bonus(),
        }
    }
}

impl ScoringConfig {
    /// Right-answer time constant for an item with these tags.
    ///
    /// Starts from the default and takes the minimum over it and every
    /// per-tag entry the item carries, so the fastest tier wins.
    pub fn tau_right_days_for(&self, tags: &[String]) -> f64 {
        let mut tau = self.tau_right_default_days;
        for (tag, days) in &self.tau_right_by_tag {
            if tags.iter().any(|t| t == tag) && *days < tau {
                tau = *days;
            }
        }
        tau
    }
}
