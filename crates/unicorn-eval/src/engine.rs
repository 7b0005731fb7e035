use std::path::Path;
use std::sync::OnceLock;

use serde_json::Value;
use unicorn_core::{aggregate, CategoryScores, Metrics, ScoringPolicy};
use unicorn_reference::ReferenceTables;
use unicorn_sentiment::SentimentScorer;

use crate::config::EngineConfig;
use crate::error::{ConfigError, EvalError};
use crate::evaluators::{EvalContext, EVALUATORS};
use crate::profile::StartupProfile;

/// Key under which [`Evaluator::annotate`] stores the metrics.
pub const METRICS_KEY: &str = "metrics";

/// The scoring engine: reference tables, sentiment backends and policy,
/// built once and shared read-only by every evaluation.
#[derive(Debug)]
pub struct Evaluator {
    tables: ReferenceTables,
    sentiment: SentimentScorer,
    policy: ScoringPolicy,
}

impl Evaluator {
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.scoring.validate()?;
        let tables = ReferenceTables::load(&config.reference_dir);
        let sentiment = SentimentScorer::from_config(&config.sentiment);
        tracing::info!(
            reference_dir = %config.reference_dir.display(),
            tables = %tables.summary(),
            financial_backend = sentiment.has_financial(),
            general_backend = sentiment.has_general(),
            "evaluator ready"
        );
        Ok(Self::from_parts(tables, sentiment, config.scoring.clone()))
    }

    pub const fn from_parts(
        tables: ReferenceTables,
        sentiment: SentimentScorer,
        policy: ScoringPolicy,
    ) -> Self {
        Self {
            tables,
            sentiment,
            policy,
        }
    }

    /// Process-wide engine built from [`EngineConfig::load`] on first use.
    /// A configuration error is logged and the defaults are used instead.
    pub fn shared() -> &'static Self {
        static SHARED: OnceLock<Evaluator> = OnceLock::new();
        SHARED.get_or_init(|| {
            let config = EngineConfig::load().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "invalid engine configuration, using defaults");
                EngineConfig::default()
            });
            Self::new(&config).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "invalid scoring policy, using defaults");
                Self::from_parts(
                    ReferenceTables::load(&config.reference_dir),
                    SentimentScorer::from_config(&config.sentiment),
                    ScoringPolicy::default(),
                )
            })
        })
    }

    pub const fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub const fn sentiment(&self) -> &SentimentScorer {
        &self.sentiment
    }

    pub const fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Scores every category and the overall UnicornScore.
    pub fn evaluate(&self, profile: &StartupProfile) -> Metrics {
        let ctx = EvalContext::new(&self.tables, &self.sentiment, &self.policy);
        let mut scores = CategoryScores::default();
        for evaluator in EVALUATORS {
            let category = evaluator.category();
            let score = evaluator.evaluate(profile, &ctx);
            tracing::debug!(%category, score, "category scored");
            scores.set(category, score);
        }
        let metrics = aggregate(scores, &self.policy);
        tracing::debug!(unicorn_score = metrics.unicorn_score, "profile evaluated");
        metrics
    }

    pub fn evaluate_value(&self, value: &Value) -> Result<Metrics, EvalError> {
        let profile = StartupProfile::from_value(value)?;
        Ok(self.evaluate(&profile))
    }

    pub fn evaluate_json(&self, json: &str) -> Result<Metrics, EvalError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| EvalError::StructuralInput(format!("not valid JSON: {e}")))?;
        self.evaluate_value(&value)
    }

    pub fn evaluate_file(&self, path: impl AsRef<Path>) -> Result<Metrics, EvalError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        self.evaluate_json(&raw)
    }

    /// Returns a copy of the profile document with its metrics stored under
    /// `"metrics"`, replacing any previous value.
    pub fn annotate(&self, value: &Value) -> Result<Value, EvalError> {
        let metrics = self.evaluate_value(value)?;
        let mut annotated = value.clone();
        if let Value::Object(map) = &mut annotated {
            map.insert(METRICS_KEY.to_string(), serde_json::to_value(metrics)?);
        }
        Ok(annotated)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::from_parts(
            ReferenceTables::empty(),
            SentimentScorer::fallback_only(),
            ScoringPolicy::default(),
        )
    }
}
