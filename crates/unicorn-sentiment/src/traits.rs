use crate::error::SentimentError;
use crate::types::ClassProbabilities;

/// A three-class (negative/neutral/positive) text classifier tuned for
/// financial language.
pub trait FinancialClassifier: Send + Sync {
    fn name(&self) -> &'static str;

    fn classify(&self, text: &str) -> Result<ClassProbabilities, SentimentError>;
}

/// A general-purpose analyzer producing a compound polarity in `[-1, 1]`.
pub trait PolarityAnalyzer: Send + Sync {
    fn name(&self) -> &'static str;

    fn compound(&self, text: &str) -> f64;
}
