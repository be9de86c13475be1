//! Engine tunables. Defaults match the shipped drill experience; deployments
//! that want a different feel override individual fields.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Probability of drawing from a recap level's focus facts instead of
    /// the full learned set, when the preset does not pin its own weight.
    pub default_recap_weight: f64,
    /// Retry budget for "give me another problem" duplicate avoidance. A
    /// heuristic bound, not an invariant: once exhausted the last candidate
    /// is returned as-is.
    pub duplicate_retry_limit: u32,
    /// The post-level-up time budget is the learner's best time multiplied
    /// by this, capped by the new level's total-time cap.
    pub target_ratchet_factor: f64,
    /// Chance of continuing the carry/borrow resample loop on each pass.
    pub resample_retry_probability: f64,
    /// Chance that a `bias_hard` preset pushes a draw toward the hard end.
    pub hard_bias_probability: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_recap_weight: 0.6,
            duplicate_retry_limit: 16,
            target_ratchet_factor: 1.5,
            resample_retry_probability: 0.8,
            hard_bias_probability: 0.5,
        }
    }
}
