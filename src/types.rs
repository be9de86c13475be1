//! Shared domain types: drill kinds, attempt records, progress state, and
//! the rolling star window consulted by the level-up decision.

use std::collections::VecDeque;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::LevelCatalog;

/// The four supported drill operations. A closed set: adding a fifth kind
/// must touch the catalog, the generator, and every exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrillType {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl DrillType {
    pub const ALL: [DrillType; 4] = [
        DrillType::Addition,
        DrillType::Subtraction,
        DrillType::Multiplication,
        DrillType::Division,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::Multiplication => "multiplication",
            Self::Division => "division",
        }
    }
}

/// One answer attempt as logged by the session UI. Append-only input; the
/// engine never mutates these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub prompt: String,
    pub a: i64,
    pub b: i64,
    pub correct_answer: i64,
    pub given_answer: i64,
    /// Whether THIS attempt was correct, not the item overall.
    pub correct: bool,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: i64,
}

impl AttemptRecord {
    /// Lenient decode from a raw JSON value. Missing or mistyped fields
    /// default (numbers to 0, `correct` to false, timestamps to the epoch)
    /// so one corrupt entry degrades a single item instead of aborting the
    /// whole session evaluation.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let int = |key: &str| value.get(key).and_then(serde_json::Value::as_i64).unwrap_or(0);
        Self {
            prompt: value
                .get("prompt")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string(),
            a: int("a"),
            b: int("b"),
            correct_answer: int("correctAnswer"),
            given_answer: int("givenAnswer"),
            correct: value
                .get("correct")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false),
            started_at: value
                .get("startedAt")
                .map(parse_started_at)
                .unwrap_or(DateTime::UNIX_EPOCH),
            elapsed_ms: int("elapsedMs"),
        }
    }
}

fn parse_started_at(value: &serde_json::Value) -> DateTime<Utc> {
    match value {
        serde_json::Value::String(raw) => {
            parse_datetime_lenient(raw).unwrap_or(DateTime::UNIX_EPOCH)
        }
        serde_json::Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or(DateTime::UNIX_EPOCH),
        _ => DateTime::UNIX_EPOCH,
    }
}

fn parse_datetime_lenient(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let trimmed = raw.trim_end_matches('Z');
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }
    None
}

/// Bounded rolling star/no-star history, newest last. Holds one round more
/// than the 5-round decision window so the hint planner can look at the
/// history both before and after the latest round.
///
/// Persisted as its string form ("10101", latest at the end).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct StarWindow {
    bits: VecDeque<bool>,
}

impl StarWindow {
    /// Stored capacity: decision window plus one round of slack.
    pub const CAPACITY: usize = 6;
    /// Rounds consulted by the level-up decision.
    pub const DECISION_SPAN: usize = 5;
    /// Recent sub-window that must carry its own share of stars.
    pub const RECENT_SPAN: usize = 3;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Append the newest outcome, dropping the oldest beyond capacity.
    pub fn push(&mut self, star: bool) {
        self.bits.push_back(star);
        while self.bits.len() > Self::CAPACITY {
            self.bits.pop_front();
        }
    }

    /// Copy of the window with one more outcome appended.
    pub fn with_appended(&self, star: bool) -> Self {
        let mut next = self.clone();
        next.push(star);
        next
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Number of stars among the newest `n` outcomes.
    pub fn ones_in_last(&self, n: usize) -> usize {
        self.bits.iter().rev().take(n).filter(|b| **b).count()
    }

    /// The level-up predicate over the window as it stands: at least 3 of
    /// the last 5 and at least 2 of the last 3 are stars. Callers must also
    /// require that the newest outcome itself was a star.
    pub fn qualifies(&self) -> bool {
        self.ones_in_last(Self::DECISION_SPAN) >= 3 && self.ones_in_last(Self::RECENT_SPAN) >= 2
    }

    pub fn as_string(&self) -> String {
        self.bits.iter().map(|b| if *b { '1' } else { '0' }).collect()
    }
}

impl From<String> for StarWindow {
    fn from(raw: String) -> Self {
        let mut window = StarWindow::new();
        for ch in raw.chars() {
            window.push(ch == '1');
        }
        window
    }
}

impl From<StarWindow> for String {
    fn from(window: StarWindow) -> Self {
        window.as_string()
    }
}

/// Per-(user, drill type) progression state. Created lazily at level 1,
/// mutated only by the progression state machine at session end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    pub drill_type: DrillType,
    /// 1-based, always within the catalog ladder for this type.
    pub level: u32,
    pub stars_recent: StarWindow,
    /// Best total session time at the current level, reset on level-up.
    pub best_time_ms: Option<i64>,
    /// Best first-try accuracy at the current level, reset on level-up.
    pub best_acc: Option<f64>,
    /// Personalized total-session time budget in seconds. Never exceeds the
    /// level's total-time cap.
    pub target_time_sec: f64,
    pub last_levelup_at: Option<DateTime<Utc>>,
}

impl ProgressState {
    /// Fresh progress row: level 1 with that level's full time budget.
    pub fn new(drill_type: DrillType, catalog: &LevelCatalog) -> Self {
        Self {
            drill_type,
            level: 1,
            stars_recent: StarWindow::new(),
            best_time_ms: None,
            best_acc: None,
            target_time_sec: catalog.thresholds(1).total_time_cap_sec,
            last_levelup_at: None,
        }
    }
}
