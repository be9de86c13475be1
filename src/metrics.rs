//! Reduce a raw session attempt log into first-try performance metrics.
//!
//! Attempts arrive in no guaranteed order; grouping is by exact prompt
//! text, so order-swapped variants of the same fact count as distinct
//! items (matching what the learner actually saw).

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::types::AttemptRecord;

/// Aggregate metrics for one finished session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    /// Distinct problems shown.
    pub items: usize,
    /// Items whose earliest attempt was correct.
    pub first_try_correct: usize,
    /// First-try accuracy; 0.0 for an empty session, never a division fault.
    pub acc: f64,
    /// Mean elapsed ms over correct first attempts; None when there were none.
    pub tpq_ms: Option<f64>,
    /// Items that took two or more wrong answers before (or without) a
    /// correct one. No longer gated on, kept for analytics.
    pub hard_mistakes: usize,
}

impl PerformanceMetrics {
    pub fn empty() -> Self {
        Self {
            items: 0,
            first_try_correct: 0,
            acc: 0.0,
            tpq_ms: None,
            hard_mistakes: 0,
        }
    }
}

#[derive(Debug, Error)]
pub enum AttemptLogError {
    #[error("attempt log is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("attempt log root must be an array")]
    NotAnArray,
}

/// Decode a raw JSON attempt log. Each entry is decoded leniently
/// ([`AttemptRecord::from_value`]); only a non-array root is an error.
pub fn parse_attempt_log(raw: &str) -> Result<Vec<AttemptRecord>, AttemptLogError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let entries = value.as_array().ok_or(AttemptLogError::NotAnArray)?;
    Ok(entries.iter().map(AttemptRecord::from_value).collect())
}

/// Compute session metrics from an unordered attempt log.
pub fn compute_metrics(attempts: &[AttemptRecord]) -> PerformanceMetrics {
    let mut groups: HashMap<&str, Vec<&AttemptRecord>> = HashMap::new();
    for attempt in attempts {
        groups.entry(attempt.prompt.as_str()).or_default().push(attempt);
    }

    let mut items = 0usize;
    let mut first_try_correct = 0usize;
    let mut hard_mistakes = 0usize;
    let mut tpq_sum = 0.0f64;
    let mut tpq_count = 0usize;

    for (_, mut group) in groups {
        group.sort_by_key(|a| a.started_at);
        items += 1;

        let first = group[0];
        if first.correct {
            first_try_correct += 1;
            tpq_sum += first.elapsed_ms as f64;
            tpq_count += 1;
        }

        // Wrong answers before the first correct one; when the item was
        // never corrected this is every wrong answer.
        let wrong_run = group.iter().take_while(|a| !a.correct).count();
        if wrong_run >= 2 {
            hard_mistakes += 1;
        }
    }

    let acc = if items == 0 {
        0.0
    } else {
        first_try_correct as f64 / items as f64
    };

    PerformanceMetrics {
        items,
        first_try_correct,
        acc,
        tpq_ms: (tpq_count > 0).then(|| tpq_sum / tpq_count as f64),
        hard_mistakes,
    }
}
