//! Problem generation from level presets.
//!
//! Prompts use the exact textual forms `"a + b"`, `"a − b"`, `"a × b"`, and
//! `"dividend ÷ divisor"`; duplicate avoidance re-derives operand identity
//! by parsing that text, so the format is a cross-component contract.

use rand::Rng;
use serde::Serialize;

use crate::catalog::LevelPreset;
use crate::config::EngineConfig;

/// One generated problem plus its spoken form for read-aloud mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub prompt: String,
    pub answer: i64,
    pub spoken: String,
}

/// Generate one problem from a preset. The random source is supplied by the
/// caller (`rand::rng()` in production, a seeded rng in tests).
pub fn generate(preset: &LevelPreset, config: &EngineConfig, rng: &mut impl Rng) -> Problem {
    match preset {
        LevelPreset::Multiplication {
            a_min,
            a_max,
            b_set,
            recap_focus,
            recap_weight,
            bias_hard,
        } => {
            let mut a = rng.random_range(*a_min..=*a_max);
            let mut b = biased_choice(b_set, recap_focus, *recap_weight, config, rng);
            if *bias_hard && rng.random_bool(config.hard_bias_probability) {
                let lo = a_min + (a_max - a_min) / 2;
                a = rng.random_range(lo..=*a_max);
                if b < 7 {
                    b = rng.random_range(7..=12);
                }
            }
            // Presentation variety only; the fact is the same either way.
            if rng.random_bool(0.5) {
                std::mem::swap(&mut a, &mut b);
            }
            let answer = a * b;
            Problem {
                prompt: format!("{a} × {b}"),
                answer,
                spoken: format!("{a} times {b} equals {answer}"),
            }
        }
        LevelPreset::Addition { min, max, carry_bias } => {
            let mut a = rng.random_range(*min..=*max);
            let mut b = rng.random_range(*min..=*max);
            if rng.random_bool(carry_bias.clamp(0.0, 1.0)) {
                let hi = (*max).max(10);
                a = rng.random_range(10..=hi);
                b = rng.random_range(10..=hi);
                // Push toward a ones-digit carry; the 20% escape chance
                // bounds the loop.
                while (a % 10) + (b % 10) < 10 {
                    if !rng.random_bool(config.resample_retry_probability) {
                        break;
                    }
                    a = rng.random_range(10..=hi);
                    b = rng.random_range(10..=hi);
                }
            }
            let answer = a + b;
            Problem {
                prompt: format!("{a} + {b}"),
                answer,
                spoken: format!("{a} plus {b} equals {answer}"),
            }
        }
        LevelPreset::Subtraction { min, max, borrow_bias } => {
            let mut a = rng.random_range(*min..=*max);
            let mut b = rng.random_range(*min..=*max);
            if a < b {
                std::mem::swap(&mut a, &mut b);
            }
            if rng.random_bool(borrow_bias.clamp(0.0, 1.0)) && a >= 10 && b >= 10 {
                let lo = (*min).max(10);
                // A borrow needs ones(a) < ones(b).
                while a % 10 >= b % 10 {
                    if !rng.random_bool(config.resample_retry_probability) {
                        break;
                    }
                    a = rng.random_range(lo..=*max);
                    b = rng.random_range(lo..=*max);
                    if a < b {
                        std::mem::swap(&mut a, &mut b);
                    }
                }
            }
            let answer = a - b;
            Problem {
                prompt: format!("{a} − {b}"),
                answer,
                spoken: format!("{a} minus {b} equals {answer}"),
            }
        }
        LevelPreset::Division {
            divisor_set,
            q_min,
            q_max,
            recap_focus,
            recap_weight,
        } => {
            let divisor = biased_choice(divisor_set, recap_focus, *recap_weight, config, rng);
            let quotient = rng.random_range(*q_min..=*q_max);
            let dividend = divisor * quotient;
            Problem {
                prompt: format!("{dividend} ÷ {divisor}"),
                answer: quotient,
                spoken: format!("{dividend} divided by {divisor} equals {quotient}"),
            }
        }
    }
}

/// With probability `weight` draw from the recap focus (when non-empty),
/// otherwise uniformly from the full set.
fn biased_choice(
    set: &[i64],
    focus: &[i64],
    weight: Option<f64>,
    config: &EngineConfig,
    rng: &mut impl Rng,
) -> i64 {
    let weight = weight.unwrap_or(config.default_recap_weight).clamp(0.0, 1.0);
    if !focus.is_empty() && rng.random_bool(weight) {
        focus[rng.random_range(0..focus.len())]
    } else {
        set[rng.random_range(0..set.len())]
    }
}

/// Normalized commutative-pair key for a prompt: sorted operands plus the
/// operator, for `+` and `×` only. `"7 × 4"` and `"4 × 7"` share a key.
pub fn pair_key(prompt: &str) -> Option<String> {
    let mut parts = prompt.split_whitespace();
    let a: i64 = parts.next()?.parse().ok()?;
    let op = parts.next()?;
    let b: i64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    match op {
        "+" | "×" => {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            Some(format!("{lo}{op}{hi}"))
        }
        _ => None,
    }
}

/// Whether a freshly generated prompt is acceptable against the previous one.
pub fn ok_against_avoid(
    new_prompt: &str,
    avoid_prompt: Option<&str>,
    avoid_pair: Option<&str>,
) -> bool {
    if avoid_prompt.is_some_and(|p| p == new_prompt) {
        return false;
    }
    if let (Some(avoid), Some(key)) = (avoid_pair, pair_key(new_prompt)) {
        if key == avoid {
            return false;
        }
    }
    true
}

/// Generate a problem that differs from the one just shown, retrying within
/// the configured budget. When the preset space is too small to differ, the
/// last candidate is returned rather than looping forever.
pub fn next_distinct(
    preset: &LevelPreset,
    config: &EngineConfig,
    avoid_prompt: Option<&str>,
    avoid_pair: Option<&str>,
    rng: &mut impl Rng,
) -> Problem {
    let mut candidate = generate(preset, config, rng);
    for _ in 1..config.duplicate_retry_limit.max(1) {
        if ok_against_avoid(&candidate.prompt, avoid_prompt, avoid_pair) {
            break;
        }
        candidate = generate(preset, config, rng);
    }
    candidate
}
