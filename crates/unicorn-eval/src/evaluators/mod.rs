//! Category evaluators. Each maps one profile section to a 0-100 score and
//! never fails: unknown inputs contribute the category default.

use unicorn_core::{Category, ScoringPolicy};
use unicorn_reference::ReferenceTables;
use unicorn_sentiment::SentimentScorer;

use crate::profile::StartupProfile;

pub mod financial;
pub mod funding;
pub mod market;
pub mod misc;
pub mod product;
pub mod team;
pub mod traction;

pub use financial::FinancialEfficiencyEvaluator;
pub use funding::FundingEvaluator;
pub use market::MarketEvaluator;
pub use misc::MiscellaneousEvaluator;
pub use product::ProductEvaluator;
pub use team::TeamEvaluator;
pub use traction::TractionEvaluator;

/// Shared, read-only inputs for one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub tables: &'a ReferenceTables,
    pub sentiment: &'a SentimentScorer,
    pub policy: &'a ScoringPolicy,
}

impl<'a> EvalContext<'a> {
    pub const fn new(
        tables: &'a ReferenceTables,
        sentiment: &'a SentimentScorer,
        policy: &'a ScoringPolicy,
    ) -> Self {
        Self {
            tables,
            sentiment,
            policy,
        }
    }

    pub const fn default_for(&self, category: Category) -> f64 {
        self.policy.defaults.get(category)
    }

    /// Financial polarity x100, or `default` when the text is unknown.
    pub fn financial_or(&self, text: Option<&str>, default: f64) -> f64 {
        present(text).map_or(default, |t| {
            self.sentiment.financial_polarity(Some(t)) * 100.0
        })
    }

    /// General polarity when that backend is ready, financial otherwise.
    pub fn preferred_polarity(&self, text: &str) -> f64 {
        if self.sentiment.has_general() {
            self.sentiment.general_polarity(Some(text))
        } else {
            self.sentiment.financial_polarity(Some(text))
        }
    }

    /// Mean of financial and general polarity when the general backend is
    /// ready, financial alone otherwise.
    pub fn blended_polarity(&self, text: &str) -> f64 {
        let financial = self.sentiment.financial_polarity(Some(text));
        if self.sentiment.has_general() {
            (financial + self.sentiment.general_polarity(Some(text))) / 2.0
        } else {
            financial
        }
    }
}

pub trait CategoryEvaluator: Send + Sync {
    fn category(&self) -> Category;

    fn evaluate(&self, profile: &StartupProfile, ctx: &EvalContext<'_>) -> u8;
}

/// All seven evaluators in report order.
pub const EVALUATORS: [&dyn CategoryEvaluator; 7] = [
    &TeamEvaluator,
    &MarketEvaluator,
    &ProductEvaluator,
    &TractionEvaluator,
    &FundingEvaluator,
    &FinancialEfficiencyEvaluator,
    &MiscellaneousEvaluator,
];

pub(crate) fn present(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}
