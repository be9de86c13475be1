use chrono::{TimeZone, Utc};
use drill_engine::catalog::LevelCatalog;
use drill_engine::config::EngineConfig;
use drill_engine::gate::{self, GateReason};
use drill_engine::metrics::{compute_metrics, parse_attempt_log};
use drill_engine::progression::{on_drill_finished, AwardTag};
use drill_engine::types::{AttemptRecord, DrillType, ProgressState};

fn sample_log(first_try_correct: usize, total: usize) -> String {
    let mut entries = Vec::new();
    for i in 0..total {
        let a = 2 + i;
        let prompt = format!("{a} × 7");
        if i >= first_try_correct {
            entries.push(serde_json::json!({
                "prompt": prompt,
                "a": a,
                "b": 7,
                "correctAnswer": a * 7,
                "givenAnswer": a * 7 + 1,
                "correct": false,
                "startedAt": format!("2026-01-05T10:00:{:02}Z", i),
                "elapsedMs": 900,
            }));
        }
        entries.push(serde_json::json!({
            "prompt": prompt,
            "a": a,
            "b": 7,
            "correctAnswer": a * 7,
            "givenAnswer": a * 7,
            "correct": true,
            "startedAt": format!("2026-01-05T10:01:{:02}Z", i),
            "elapsedMs": 1000,
        }));
    }
    serde_json::Value::Array(entries).to_string()
}

fn parsed(first_try_correct: usize, total: usize) -> Vec<AttemptRecord> {
    parse_attempt_log(&sample_log(first_try_correct, total))
        .expect("sample log should decode")
}

#[test]
fn strong_fast_session_earns_a_star() {
    let attempts = parsed(19, 20);
    let metrics = compute_metrics(&attempts);
    assert_eq!(metrics.items, 20);
    assert_eq!(metrics.first_try_correct, 19);

    let verdict = gate::evaluate(&metrics, 20_000, 600.0);
    assert!(verdict.star);
    assert_eq!(verdict.reason, GateReason::Ok);
}

#[test]
fn accurate_but_slow_session_is_rejected_for_time() {
    let attempts = parsed(19, 20);
    let metrics = compute_metrics(&attempts);

    let verdict = gate::evaluate(&metrics, 700_000, 600.0);
    assert!(!verdict.star);
    assert_eq!(verdict.reason, GateReason::TooSlow);
}

#[test]
fn three_star_sessions_level_up_a_fresh_progress() {
    let catalog = LevelCatalog::new();
    let config = EngineConfig::default();
    let mut progress = ProgressState::new(DrillType::Multiplication, &catalog);
    let start_level = progress.level;
    let now = Utc.with_ymd_and_hms(2026, 1, 5, 10, 30, 0).unwrap();

    let attempts = parsed(19, 20);
    let metrics = compute_metrics(&attempts);

    let mut leveled = false;
    for round in 0..3 {
        let verdict = gate::evaluate(&metrics, 120_000, progress.target_time_sec);
        assert!(verdict.star, "round {round} should earn a star");
        let (next, awards) =
            on_drill_finished(&catalog, &config, &progress, &metrics, true, 120_000, now);
        leveled = awards.iter().any(|a| a.tag == AwardTag::LevelUp);
        progress = next;
        if round < 2 {
            assert!(!leveled, "level-up needs three stars, not {}", round + 1);
        }
    }

    assert!(leveled, "third consecutive star should trigger a level-up");
    assert!(progress.level > start_level);
    assert_eq!(progress.stars_recent.as_string(), "");
    assert!(progress.best_time_ms.is_none());
    assert!(progress.best_acc.is_none());
    assert_eq!(progress.last_levelup_at, Some(now));
}

#[test]
fn empty_session_never_earns_a_star() {
    let attempts = parse_attempt_log("[]").expect("empty array should decode");
    let metrics = compute_metrics(&attempts);
    assert_eq!(metrics.items, 0);
    assert_eq!(metrics.acc, 0.0);

    let verdict = gate::evaluate(&metrics, 0, 600.0);
    assert!(!verdict.star);
    assert_eq!(verdict.reason, GateReason::AccuracyBelowGate);
}

#[test]
fn target_time_tightens_after_a_fast_level_up() {
    let catalog = LevelCatalog::new();
    let config = EngineConfig::default();
    let mut progress = ProgressState::new(DrillType::Division, &catalog);
    let now = Utc.with_ymd_and_hms(2026, 1, 5, 11, 0, 0).unwrap();

    let attempts = parsed(20, 20);
    let metrics = compute_metrics(&attempts);

    for _ in 0..3 {
        let (next, _) =
            on_drill_finished(&catalog, &config, &progress, &metrics, true, 100_000, now);
        progress = next;
    }

    // best 100s ratcheted by 1.5 is well under the level-2 cap.
    assert_eq!(progress.level, 2);
    assert!((progress.target_time_sec - 150.0).abs() < 1e-9);
}
