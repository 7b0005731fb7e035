use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::config::SentimentConfig;
use crate::error::SentimentError;
use crate::factory::{build_financial_classifier, build_polarity_analyzer};
use crate::fallback::keyword_polarity;
use crate::traits::{FinancialClassifier, PolarityAnalyzer};

/// Outcome of constructing a backend, decided once and never retried.
pub enum BackendState<B: ?Sized> {
    Ready(Arc<B>),
    Unavailable(String),
}

impl<B: ?Sized> BackendState<B> {
    /// Records a construction result, logging the failure reason once.
    pub fn from_result(kind: &str, result: Result<Arc<B>, SentimentError>) -> Self {
        match result {
            Ok(backend) => Self::Ready(backend),
            Err(err @ SentimentError::NotConfigured(_)) => {
                tracing::info!(backend = kind, reason = %err, "using keyword fallback");
                Self::Unavailable(err.to_string())
            }
            Err(err) => {
                tracing::warn!(backend = kind, error = %err, "backend unavailable, using keyword fallback");
                Self::Unavailable(err.to_string())
            }
        }
    }

    pub fn backend(&self) -> Option<&B> {
        match self {
            Self::Ready(b) => Some(b.as_ref()),
            Self::Unavailable(_) => None,
        }
    }

    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Unavailable(r) => Some(r),
        }
    }
}

impl<B: ?Sized> fmt::Debug for BackendState<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(_) => f.write_str("Ready"),
            Self::Unavailable(r) => f.debug_tuple("Unavailable").field(r).finish(),
        }
    }
}

/// Text polarity in `[0, 1]` from a financial classifier and a general
/// lexicon analyzer, each falling back to keyword counting when absent.
///
/// A classifier failure that would repeat on every call (transport error,
/// timeout, async caller) switches the financial backend off for the life
/// of the scorer; it is logged once and never retried.
#[derive(Debug)]
pub struct SentimentScorer {
    financial: BackendState<dyn FinancialClassifier>,
    general: BackendState<dyn PolarityAnalyzer>,
    financial_disabled: OnceLock<String>,
}

impl SentimentScorer {
    pub const fn new(
        financial: BackendState<dyn FinancialClassifier>,
        general: BackendState<dyn PolarityAnalyzer>,
    ) -> Self {
        Self {
            financial,
            general,
            financial_disabled: OnceLock::new(),
        }
    }

    pub fn from_config(cfg: &SentimentConfig) -> Self {
        Self::new(
            BackendState::from_result("financial", build_financial_classifier(&cfg.financial)),
            BackendState::from_result("general", build_polarity_analyzer(&cfg.general)),
        )
    }

    /// Both backends unavailable; every score comes from the keyword heuristic.
    pub fn fallback_only() -> Self {
        Self::new(
            BackendState::Unavailable("fallback only".to_string()),
            BackendState::Unavailable("fallback only".to_string()),
        )
    }

    /// The classifier was built and has not been switched off since.
    pub fn has_financial(&self) -> bool {
        self.financial.is_ready() && self.financial_disabled.get().is_none()
    }

    /// Why a ready classifier was switched off, if it was.
    pub fn financial_disabled_reason(&self) -> Option<&str> {
        self.financial_disabled.get().map(String::as_str)
    }

    pub const fn has_general(&self) -> bool {
        self.general.is_ready()
    }

    pub const fn financial(&self) -> &BackendState<dyn FinancialClassifier> {
        &self.financial
    }

    pub const fn general(&self) -> &BackendState<dyn PolarityAnalyzer> {
        &self.general
    }

    /// Financial polarity. Missing or blank text is neutral (0.5); a failed
    /// classifier call falls back to keyword counting.
    pub fn financial_polarity(&self, text: Option<&str>) -> f64 {
        let Some(text) = non_blank(text) else {
            return 0.5;
        };
        let classifier = match &self.financial {
            BackendState::Ready(c) if self.financial_disabled.get().is_none() => c,
            _ => return keyword_polarity(text),
        };
        match classifier.classify(text) {
            Ok(probs) => probs.polarity(),
            Err(err) if err.disables_backend() => {
                if self.financial_disabled.set(err.to_string()).is_ok() {
                    tracing::warn!(
                        backend = classifier.name(),
                        error = %err,
                        "classifier disabled, using keyword fallback"
                    );
                }
                keyword_polarity(text)
            }
            Err(err) => {
                tracing::warn!(backend = classifier.name(), error = %err, "classification failed");
                keyword_polarity(text)
            }
        }
    }

    /// General polarity, the compound score rescaled onto `[0, 1]`. Missing
    /// or blank text scores 0.
    pub fn general_polarity(&self, text: Option<&str>) -> f64 {
        let Some(text) = non_blank(text) else {
            return 0.0;
        };
        match &self.general {
            BackendState::Ready(analyzer) => {
                let c = analyzer.compound(text);
                if c.is_finite() {
                    ((c + 1.0) / 2.0).clamp(0.0, 1.0)
                } else {
                    0.5
                }
            }
            BackendState::Unavailable(_) => keyword_polarity(text),
        }
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::fallback_only()
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}
