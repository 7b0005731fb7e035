use std::sync::Arc;
use std::time::Duration;

use crate::config::{
    FinancialBackendConfig, FinancialProvider, GeneralBackendConfig, GeneralProvider,
    TeiClassifierConfig,
};
use crate::error::SentimentError;
use crate::providers::{LexiconAnalyzer, TeiFinancialClassifier};
use crate::traits::{FinancialClassifier, PolarityAnalyzer};

pub fn build_financial_classifier(
    cfg: &FinancialBackendConfig,
) -> Result<Arc<dyn FinancialClassifier>, SentimentError> {
    match cfg.provider {
        FinancialProvider::Disabled => Err(SentimentError::NotConfigured(
            "financial classifier disabled".to_string(),
        )),
        FinancialProvider::Tei => {
            let endpoint = cfg
                .endpoint
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .ok_or_else(|| {
                    SentimentError::NotConfigured("financial.endpoint is not set".to_string())
                })?;
            let mut tei = TeiClassifierConfig::new(endpoint);
            tei.api_key.clone_from(&cfg.api_key);
            tei.expected_model.clone_from(&cfg.expected_model);
            tei.timeout = Duration::from_secs(cfg.timeout_secs.max(1));
            tei.max_input_chars = cfg.max_input_chars;
            Ok(Arc::new(TeiFinancialClassifier::connect(tei)?))
        }
    }
}

pub fn build_polarity_analyzer(
    cfg: &GeneralBackendConfig,
) -> Result<Arc<dyn PolarityAnalyzer>, SentimentError> {
    match cfg.provider {
        GeneralProvider::Disabled => Err(SentimentError::NotConfigured(
            "general analyzer disabled".to_string(),
        )),
        GeneralProvider::Lexicon => {
            let path = cfg.lexicon_path.as_deref().ok_or_else(|| {
                SentimentError::NotConfigured("general.lexicon_path is not set".to_string())
            })?;
            Ok(Arc::new(LexiconAnalyzer::from_path(path)?))
        }
    }
}
