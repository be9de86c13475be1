//! Kid-friendly explanations for a no-star session.

use crate::gate::{required_accuracy, GateReason};
use crate::metrics::PerformanceMetrics;

/// Produce a concise, encouraging reason for a no-star outcome. The item
/// count falls back to the expected session length so a sparse log still
/// renders a sensible goal.
pub fn friendly_fail_message(
    metrics: &PerformanceMetrics,
    target_time_sec: f64,
    reason: GateReason,
    expected_items: usize,
) -> String {
    let expected = if expected_items == 0 { 20 } else { expected_items };
    let items = metrics.items.max(expected);
    let need = (required_accuracy(items) * items as f64).ceil() as usize;

    match reason {
        GateReason::AccuracyBelowGate => {
            if need.saturating_sub(metrics.first_try_correct) <= 1 {
                "Just one more correct and you'll get a star!".to_string()
            } else {
                format!("Great effort: {need}/{items} correct is the goal.")
            }
        }
        GateReason::TooSlow => {
            let total = target_time_sec.max(0.0) as i64;
            let minutes = total / 60;
            let seconds = total % 60;
            format!("Just a bit faster: finish under {minutes}:{seconds:02} to earn a star.")
        }
        GateReason::Ok => "So close, one more push and you'll have it!".to_string(),
    }
}
