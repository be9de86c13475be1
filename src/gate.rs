//! The mastery gate: decides whether a finished session earns a star.
//!
//! Two gates, evaluated in order with the first failure winning: first-try
//! accuracy against an item-count-tiered requirement, then total elapsed
//! time against the learner's personalized budget. An earlier design also
//! gated on a per-question cap, a hard-mistake cap, and EWMA-relative speed
//! improvement; those proved brittle with few first-try-correct samples and
//! were dropped, though the metrics behind them are still computed.

use serde::Serialize;

use crate::metrics::PerformanceMetrics;

/// Why the gate decided the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateReason {
    Ok,
    AccuracyBelowGate,
    TooSlow,
}

impl GateReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::AccuracyBelowGate => "accuracy_below_gate",
            Self::TooSlow => "too_slow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateVerdict {
    pub star: bool,
    pub reason: GateReason,
}

/// Required first-try accuracy, tiered by how many items the session had.
/// Short sessions get a gentler bar.
pub fn required_accuracy(items: usize) -> f64 {
    if items <= 10 {
        0.80
    } else if items <= 20 {
        0.85
    } else {
        0.90
    }
}

/// Evaluate the star decision for a finished session.
pub fn evaluate(
    metrics: &PerformanceMetrics,
    total_elapsed_ms: i64,
    target_time_sec: f64,
) -> GateVerdict {
    let verdict = evaluate_with_gate(
        metrics,
        total_elapsed_ms,
        target_time_sec,
        required_accuracy(metrics.items),
    );
    tracing::debug!(
        star = verdict.star,
        reason = verdict.reason.as_str(),
        items = metrics.items,
        acc = metrics.acc,
        total_elapsed_ms,
        target_time_sec,
        "mastery gate"
    );
    verdict
}

/// Gate evaluation with an explicit accuracy requirement. Raising the
/// requirement can only flip a star to a non-star, never the reverse.
pub fn evaluate_with_gate(
    metrics: &PerformanceMetrics,
    total_elapsed_ms: i64,
    target_time_sec: f64,
    required_acc: f64,
) -> GateVerdict {
    if metrics.acc < required_acc {
        return GateVerdict {
            star: false,
            reason: GateReason::AccuracyBelowGate,
        };
    }
    // Strict comparison, no tolerance: exactly on budget still passes.
    if total_elapsed_ms as f64 / 1000.0 > target_time_sec {
        return GateVerdict {
            star: false,
            reason: GateReason::TooSlow,
        };
    }
    GateVerdict {
        star: true,
        reason: GateReason::Ok,
    }
}
