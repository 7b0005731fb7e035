use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialProvider {
    /// Sequence-classification model served over HTTP (`/info`, `/predict`).
    #[default]
    Tei,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialBackendConfig {
    pub provider: FinancialProvider,
    /// Base URL of the classification server; unset means unavailable.
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    /// Model id the server is expected to report. A mismatch is logged.
    pub expected_model: Option<String>,
    pub timeout_secs: u64,
    pub max_input_chars: usize,
}

impl Default for FinancialBackendConfig {
    fn default() -> Self {
        Self {
            provider: FinancialProvider::Tei,
            endpoint: None,
            api_key: None,
            expected_model: Some("ProsusAI/finbert".to_string()),
            timeout_secs: 10,
            max_input_chars: 512,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TeiClassifierConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub expected_model: Option<String>,
    pub timeout: Duration,
    pub max_input_chars: usize,
}

impl TeiClassifierConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            expected_model: None,
            timeout: Duration::from_secs(10),
            max_input_chars: 512,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneralProvider {
    /// VADER-format lexicon file.
    #[default]
    Lexicon,
    Disabled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralBackendConfig {
    pub provider: GeneralProvider,
    pub lexicon_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub financial: FinancialBackendConfig,
    pub general: GeneralBackendConfig,
}
