//! Startup evaluation engine.
//!
//! [`Evaluator`] turns a loosely structured startup profile into seven
//! category scores and an overall `UnicornScore`, all integers in `[0, 100]`.
//! Missing or malformed fields fall back to per-category defaults; the only
//! reportable failure is a profile document that is not a JSON object.

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluators;
pub mod lenient;
pub mod profile;

pub use config::EngineConfig;
pub use engine::{Evaluator, METRICS_KEY};
pub use error::{ConfigError, EvalError};
pub use evaluators::{CategoryEvaluator, EvalContext, EVALUATORS};
pub use profile::StartupProfile;
pub use unicorn_core::{Category, CategoryScores, Metrics, ScoringPolicy};
