//! The per-type difficulty ladders and their threshold bands.
//!
//! Built once at process start and injected wherever presets, labels, or
//! thresholds are needed; stateless and immutable after construction.
//! Out-of-range levels clamp silently rather than erroring, because ladders
//! can shrink or grow between versions while saved progress rows stay put.

use serde::{Deserialize, Serialize};

use crate::types::DrillType;

/// Generation parameters for one rung of a ladder. One variant per drill
/// type so the generator's matching stays exhaustive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum LevelPreset {
    Multiplication {
        a_min: i64,
        a_max: i64,
        b_set: Vec<i64>,
        /// Recently introduced tables to bias toward; empty for non-recap.
        recap_focus: Vec<i64>,
        /// Per-preset override of the recap draw probability.
        recap_weight: Option<f64>,
        bias_hard: bool,
    },
    Addition {
        min: i64,
        max: i64,
        carry_bias: f64,
    },
    Subtraction {
        min: i64,
        max: i64,
        borrow_bias: f64,
    },
    Division {
        divisor_set: Vec<i64>,
        q_min: i64,
        q_max: i64,
        recap_focus: Vec<i64>,
        recap_weight: Option<f64>,
    },
}

impl LevelPreset {
    pub fn drill_type(&self) -> DrillType {
        match self {
            Self::Multiplication { .. } => DrillType::Multiplication,
            Self::Addition { .. } => DrillType::Addition,
            Self::Subtraction { .. } => DrillType::Subtraction,
            Self::Division { .. } => DrillType::Division,
        }
    }

    /// Recap levels revisit the most recently introduced facts while still
    /// sampling the full learned set.
    pub fn is_recap(&self) -> bool {
        match self {
            Self::Multiplication { recap_focus, .. } | Self::Division { recap_focus, .. } => {
                !recap_focus.is_empty()
            }
            Self::Addition { .. } | Self::Subtraction { .. } => false,
        }
    }
}

/// Per-level-band thresholds. The active mastery gate reads only
/// `accuracy` and `total_time_cap_sec`; the per-question cap, delta, and
/// hard-mistake cap are retained from the earlier multi-gate design for
/// analytics and are not consulted by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdBand {
    pub accuracy: f64,
    pub per_question_cap_sec: f64,
    pub delta: f64,
    pub hard_mistake_cap: u32,
    pub total_time_cap_sec: f64,
}

#[derive(Debug, Clone)]
struct LevelEntry {
    label: String,
    preset: LevelPreset,
}

/// Immutable registry of the four ladders.
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    addition: Vec<LevelEntry>,
    subtraction: Vec<LevelEntry>,
    multiplication: Vec<LevelEntry>,
    division: Vec<LevelEntry>,
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelCatalog {
    pub fn new() -> Self {
        let catalog = Self {
            addition: add_levels(),
            subtraction: sub_levels(),
            multiplication: mul_levels(),
            division: div_levels(),
        };
        for ty in DrillType::ALL {
            for entry in catalog.ladder(ty) {
                match &entry.preset {
                    LevelPreset::Multiplication { b_set, .. } => {
                        assert!(!b_set.is_empty(), "{}: empty b_set", entry.label);
                    }
                    LevelPreset::Division { divisor_set, .. } => {
                        assert!(
                            !divisor_set.is_empty() && !divisor_set.contains(&0),
                            "{}: divisor set must be non-empty and zero-free",
                            entry.label
                        );
                    }
                    LevelPreset::Addition { .. } | LevelPreset::Subtraction { .. } => {}
                }
            }
        }
        catalog
    }

    fn ladder(&self, drill_type: DrillType) -> &[LevelEntry] {
        match drill_type {
            DrillType::Addition => &self.addition,
            DrillType::Subtraction => &self.subtraction,
            DrillType::Multiplication => &self.multiplication,
            DrillType::Division => &self.division,
        }
    }

    pub fn max_level(&self, drill_type: DrillType) -> u32 {
        self.ladder(drill_type).len() as u32
    }

    /// Clamp an arbitrary level into `[1, max_level]`.
    pub fn clamp_level(&self, drill_type: DrillType, level: i64) -> u32 {
        level.clamp(1, self.max_level(drill_type) as i64) as u32
    }

    fn entry(&self, drill_type: DrillType, level: u32) -> &LevelEntry {
        let clamped = self.clamp_level(drill_type, level as i64);
        &self.ladder(drill_type)[(clamped - 1) as usize]
    }

    pub fn preset(&self, drill_type: DrillType, level: u32) -> &LevelPreset {
        &self.entry(drill_type, level).preset
    }

    pub fn label(&self, drill_type: DrillType, level: u32) -> &str {
        &self.entry(drill_type, level).label
    }

    pub fn is_recap(&self, drill_type: DrillType, level: u32) -> bool {
        self.preset(drill_type, level).is_recap()
    }

    /// Thresholds vary by broad level band, not per ladder.
    pub fn thresholds(&self, level: u32) -> ThresholdBand {
        if level <= 2 {
            ThresholdBand {
                accuracy: 0.75,
                per_question_cap_sec: 10.0,
                delta: 0.10,
                hard_mistake_cap: 2,
                total_time_cap_sec: 10.0 * 60.0,
            }
        } else if level <= 4 {
            ThresholdBand {
                accuracy: 0.85,
                per_question_cap_sec: 8.0,
                delta: 0.12,
                hard_mistake_cap: 2,
                total_time_cap_sec: 8.0 * 60.0,
            }
        } else if level <= 6 {
            ThresholdBand {
                accuracy: 0.90,
                per_question_cap_sec: 6.0,
                delta: 0.15,
                hard_mistake_cap: 1,
                total_time_cap_sec: 6.0 * 60.0,
            }
        } else {
            ThresholdBand {
                accuracy: 0.95,
                per_question_cap_sec: 4.5,
                delta: 0.18,
                hard_mistake_cap: 1,
                total_time_cap_sec: 5.0 * 60.0,
            }
        }
    }
}

fn mul(label: &str, a_max: i64, b_set: &[i64], recap_focus: &[i64], bias_hard: bool) -> LevelEntry {
    LevelEntry {
        label: label.to_string(),
        preset: LevelPreset::Multiplication {
            a_min: 1,
            a_max,
            b_set: b_set.to_vec(),
            recap_focus: recap_focus.to_vec(),
            recap_weight: None,
            bias_hard,
        },
    }
}

// Multiplication introduces one table at a time, with a recap stop after
// each bundle; later levels widen the A range and mix all tables.
fn mul_levels() -> Vec<LevelEntry> {
    vec![
        mul("L1: ×2 (A 1–5)", 5, &[2], &[], false),
        mul("L2: ×3 (A 1–5)", 5, &[3], &[], false),
        mul("L3: Recap ×2–3 (A 1–5)", 5, &[2, 3], &[3], false),
        mul("L4: ×4 (A 1–5)", 5, &[4], &[], false),
        mul("L5: ×5 (A 1–5)", 5, &[5], &[], false),
        mul("L6: Recap ×2–5 (A 1–5)", 5, &[2, 3, 4, 5], &[4, 5], false),
        mul("L7: ×6 (A 1–9)", 9, &[6], &[], false),
        mul("L8: ×7 (A 1–9)", 9, &[7], &[], false),
        mul("L9: Recap ×2–7 (A 1–9)", 9, &[2, 3, 4, 5, 6, 7], &[6, 7], false),
        mul("L10: ×8 (A 1–9)", 9, &[8], &[], false),
        mul("L11: ×9 (A 1–9)", 9, &[9], &[], false),
        mul("L12: Recap ×2–9 (A 1–9)", 9, &[2, 3, 4, 5, 6, 7, 8, 9], &[8, 9], false),
        mul("L13: ×10–12 (A 1–12)", 12, &[10, 11, 12], &[], false),
        mul(
            "L14: Recap ×2–12 (A 1–12)",
            12,
            &[2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
            &[10, 11, 12],
            false,
        ),
        mul("L15: Mixed ×1–12", 12, &(1..=12).collect::<Vec<_>>(), &[], false),
        mul("L16: Mixed ×1–12 (harder)", 12, &(1..=12).collect::<Vec<_>>(), &[], true),
        mul("L17: Mastery ×1–12", 12, &(1..=12).collect::<Vec<_>>(), &[], true),
    ]
}

fn add_entry(label: &str, max: i64, carry_bias: f64) -> LevelEntry {
    LevelEntry {
        label: label.to_string(),
        preset: LevelPreset::Addition { min: 0, max, carry_bias },
    }
}

fn add_levels() -> Vec<LevelEntry> {
    vec![
        add_entry("L1: 0–10 (no-carry bias)", 10, 0.2),
        add_entry("L2: 0–20 (some carry)", 20, 0.4),
        add_entry("L3: 0–50 (carry common)", 50, 0.6),
        add_entry("L4: 0–100 (carry common)", 100, 0.6),
        add_entry("L5: 0–200 (carry frequent)", 200, 0.7),
    ]
}

fn sub_entry(label: &str, max: i64, borrow_bias: f64) -> LevelEntry {
    LevelEntry {
        label: label.to_string(),
        preset: LevelPreset::Subtraction { min: 0, max, borrow_bias },
    }
}

fn sub_levels() -> Vec<LevelEntry> {
    vec![
        sub_entry("L1: 0–10 (no-borrow bias)", 10, 0.2),
        sub_entry("L2: 0–20 (some borrow)", 20, 0.4),
        sub_entry("L3: 0–50 (borrow common)", 50, 0.6),
        sub_entry("L4: 0–100 (borrow common)", 100, 0.6),
        sub_entry("L5: 0–200 (borrow frequent)", 200, 0.7),
    ]
}

fn div(label: &str, divisor_set: &[i64], q_max: i64, recap_focus: &[i64]) -> LevelEntry {
    LevelEntry {
        label: label.to_string(),
        preset: LevelPreset::Division {
            divisor_set: divisor_set.to_vec(),
            q_min: 1,
            q_max,
            recap_focus: recap_focus.to_vec(),
            recap_weight: None,
        },
    }
}

// Division mirrors the multiplication ladder on quotient bands.
fn div_levels() -> Vec<LevelEntry> {
    vec![
        div("L1: ÷ by 2 (q 1–5)", &[2], 5, &[]),
        div("L2: ÷ by 3 (q 1–5)", &[3], 5, &[]),
        div("L3: Recap ÷2–3 (q 1–5)", &[2, 3], 5, &[3]),
        div("L4: ÷ by 4–5 (q 1–9)", &[4, 5], 9, &[]),
        div("L5: ÷ by 6–7 (q 1–9)", &[6, 7], 9, &[]),
        div("L6: Recap ÷2–7 (q 1–9)", &[2, 3, 4, 5, 6, 7], 9, &[6, 7]),
        div("L7: ÷ by 8–9 (q 1–9)", &[8, 9], 9, &[]),
        div("L8: ÷ by 10–12 (q 1–12)", &[10, 11, 12], 12, &[]),
        div("L9: Mixed ÷1–12 (q 1–12)", &(1..=12).collect::<Vec<_>>(), 12, &[]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_level_stays_in_range() {
        let catalog = LevelCatalog::new();
        assert_eq!(catalog.clamp_level(DrillType::Addition, 0), 1);
        assert_eq!(catalog.clamp_level(DrillType::Addition, -3), 1);
        assert_eq!(catalog.clamp_level(DrillType::Addition, 99), 5);
        assert_eq!(catalog.clamp_level(DrillType::Multiplication, 99), 17);
        assert_eq!(catalog.clamp_level(DrillType::Division, 4), 4);
    }

    #[test]
    fn out_of_range_lookups_clamp_silently() {
        let catalog = LevelCatalog::new();
        assert_eq!(
            catalog.label(DrillType::Subtraction, 999),
            "L5: 0–200 (borrow frequent)"
        );
        assert_eq!(catalog.label(DrillType::Subtraction, 0), "L1: 0–10 (no-borrow bias)");
    }

    #[test]
    fn threshold_bands_tighten_with_level() {
        let catalog = LevelCatalog::new();
        let bands: Vec<ThresholdBand> = (1..=8).map(|l| catalog.thresholds(l)).collect();
        for pair in bands.windows(2) {
            assert!(pair[0].accuracy <= pair[1].accuracy);
            assert!(pair[0].total_time_cap_sec >= pair[1].total_time_cap_sec);
        }
        assert_eq!(catalog.thresholds(1).total_time_cap_sec, 600.0);
        assert_eq!(catalog.thresholds(3).total_time_cap_sec, 480.0);
        assert_eq!(catalog.thresholds(5).total_time_cap_sec, 360.0);
        assert_eq!(catalog.thresholds(7).total_time_cap_sec, 300.0);
    }

    #[test]
    fn presets_match_their_drill_type() {
        let catalog = LevelCatalog::new();
        for ty in DrillType::ALL {
            for level in 1..=catalog.max_level(ty) {
                assert_eq!(catalog.preset(ty, level).drill_type(), ty);
            }
        }
    }

    #[test]
    fn recap_levels_are_marked() {
        let catalog = LevelCatalog::new();
        assert!(catalog.is_recap(DrillType::Multiplication, 3));
        assert!(!catalog.is_recap(DrillType::Multiplication, 1));
        assert!(catalog.is_recap(DrillType::Division, 6));
        // Addition and subtraction ladders never recap.
        for level in 1..=catalog.max_level(DrillType::Addition) {
            assert!(!catalog.is_recap(DrillType::Addition, level));
        }
    }

    #[test]
    fn division_presets_never_carry_zero_divisors() {
        let catalog = LevelCatalog::new();
        for level in 1..=catalog.max_level(DrillType::Division) {
            match catalog.preset(DrillType::Division, level) {
                LevelPreset::Division { divisor_set, .. } => {
                    assert!(!divisor_set.contains(&0));
                }
                other => panic!("unexpected preset {other:?}"),
            }
        }
    }
}
