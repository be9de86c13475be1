//! # drill-engine - adaptive arithmetic drill progression
//!
//! Pure Rust engine for mastery-based arithmetic practice:
//!
//! - **Level catalog** - per-operation level ladders with recap stops and
//!   tiered pass thresholds
//! - **Problem generation** - recap-weighted, difficulty-biased sampling with
//!   duplicate avoidance
//! - **Performance analysis** - first-try metrics over an append-only attempt
//!   log
//! - **Star gate** - accuracy and time budget decision for a session
//! - **Progression** - rolling star window, level-up rule, personal bests and
//!   target-time ratchet
//! - **Hint planning** - minimal stars-over-rounds plan to the next level-up
//!
//! ## Design goals
//!
//! - **Pure library** - no I/O, no storage, no global state; callers own
//!   persistence and UI
//! - **Deterministic where it matters** - the RNG is injected, so generation
//!   is seedable in tests
//! - **Lenient at the edges** - attempt logs decode with per-field defaults
//!   instead of failing a session
//!
//! ## Module structure
//!
//! - [`catalog`] - level presets, labels, thresholds
//! - [`generator`] - problem sampling and duplicate avoidance
//! - [`metrics`] - attempt-log parsing and first-try metrics
//! - [`gate`] - star decision
//! - [`progression`] - state machine, awards, session snapshot
//! - [`hint`] - level-up hint planner
//! - [`feedback`] - friendly no-star explanations
//! - [`config`] - engine tunables
//! - [`types`] - shared types (drill kinds, attempts, star window, progress)
//!
//! ## Example
//!
//! ```rust
//! use drill_engine::{DrillType, EngineConfig, LevelCatalog, ProgressState};
//!
//! let catalog = LevelCatalog::new();
//! let config = EngineConfig::default();
//! let progress = ProgressState::new(DrillType::Multiplication, &catalog);
//!
//! let preset = catalog.preset(DrillType::Multiplication, progress.level);
//! let problem = drill_engine::generator::generate(preset, &config, &mut rand::rng());
//! assert!(!problem.prompt.is_empty());
//! ```

pub mod catalog;
pub mod config;
pub mod feedback;
pub mod gate;
pub mod generator;
pub mod hint;
pub mod metrics;
pub mod progression;
pub mod types;

pub use catalog::{LevelCatalog, LevelPreset, ThresholdBand};
pub use config::EngineConfig;
pub use gate::{GateReason, GateVerdict};
pub use generator::Problem;
pub use metrics::{AttemptLogError, PerformanceMetrics};
pub use progression::{Award, AwardTag};
pub use types::{AttemptRecord, DrillType, ProgressState, StarWindow};
