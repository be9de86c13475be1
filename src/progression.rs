//! Post-session progression: personal bests, the rolling-window level-up
//! decision, and the target-time ratchet.
//!
//! Pure over its inputs; the caller loads the progress row before the call
//! and persists the returned row after it. Concurrent finishes for the same
//! (user, drill type) pair must be serialized by the caller, or interleaved
//! writes can corrupt the star history.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::LevelCatalog;
use crate::config::EngineConfig;
use crate::metrics::PerformanceMetrics;
use crate::types::ProgressState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardTag {
    Star,
    PbTime,
    PbAcc,
    LevelUp,
}

impl AwardTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Star => "star",
            Self::PbTime => "pb_time",
            Self::PbAcc => "pb_acc",
            Self::LevelUp => "level_up",
        }
    }
}

/// An award tag plus its display text, in the order earned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    pub tag: AwardTag,
    pub text: String,
}

impl Award {
    fn star() -> Self {
        Self {
            tag: AwardTag::Star,
            text: "⭐ Star earned".to_string(),
        }
    }

    fn pb_time() -> Self {
        Self {
            tag: AwardTag::PbTime,
            text: "🏁 New best time".to_string(),
        }
    }

    fn pb_acc() -> Self {
        Self {
            tag: AwardTag::PbAcc,
            text: "🎯 New best accuracy".to_string(),
        }
    }

    fn level_up(label: &str) -> Self {
        Self {
            tag: AwardTag::LevelUp,
            text: format!("⬆️ Level up to {label}"),
        }
    }
}

/// Whether a round with outcome `star` triggers a level-up given the star
/// history as it stood before that round was recorded.
pub fn levelup_decision(progress: &ProgressState, star: bool) -> bool {
    star && progress.stars_recent.with_appended(true).qualifies()
}

/// Apply a finished drill to the progress row. Returns the updated row and
/// the awards earned, ordered star, pb_time, pb_acc, level_up.
pub fn on_drill_finished(
    catalog: &LevelCatalog,
    config: &EngineConfig,
    progress: &ProgressState,
    metrics: &PerformanceMetrics,
    star: bool,
    total_elapsed_ms: i64,
    now: DateTime<Utc>,
) -> (ProgressState, Vec<Award>) {
    let mut next = progress.clone();
    let mut awards = Vec::new();

    if star {
        awards.push(Award::star());
    }

    if next.best_time_ms.map_or(true, |best| total_elapsed_ms < best) {
        next.best_time_ms = Some(total_elapsed_ms);
        awards.push(Award::pb_time());
    }
    if next.best_acc.map_or(true, |best| metrics.acc > best) {
        next.best_acc = Some(metrics.acc);
        awards.push(Award::pb_acc());
    }

    // The decision reads the window as it stood before this round; the
    // append below is permanent either way.
    let did_level_up = levelup_decision(progress, star);
    next.stars_recent.push(star);

    if did_level_up {
        let drill_type = progress.drill_type;
        let best_sec = next.best_time_ms.unwrap_or(total_elapsed_ms) as f64 / 1000.0;

        let mut next_level = catalog.clamp_level(drill_type, progress.level as i64 + 1);
        // One level in there is nothing to recap yet; skip straight past.
        if progress.level == 1 && catalog.is_recap(drill_type, next_level) {
            next_level = catalog.clamp_level(drill_type, next_level as i64 + 1);
        }

        let band = catalog.thresholds(next_level);
        next.target_time_sec = band
            .total_time_cap_sec
            .min(best_sec * config.target_ratchet_factor);

        if next_level != progress.level {
            let label = catalog.label(drill_type, next_level);
            tracing::info!(
                drill_type = drill_type.as_str(),
                from_level = progress.level,
                to_level = next_level,
                target_time_sec = next.target_time_sec,
                "level up"
            );
            awards.push(Award::level_up(label));
        }

        next.level = next_level;
        next.last_levelup_at = Some(now);
        next.best_time_ms = None;
        next.best_acc = None;
        next.stars_recent.clear();
    }

    (next, awards)
}

/// One-line summary of a finished session for result records, e.g.
/// `"[L7] L7: ×6 (A 1–9) • Score 18/20"`.
pub fn session_snapshot(level: u32, label: &str, score: usize, question_count: usize) -> String {
    format!("[L{level}] {label} • Score {score}/{question_count}")
}
