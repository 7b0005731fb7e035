pub mod config;
pub mod error;
pub mod factory;
pub mod fallback;
pub mod providers;
pub mod scorer;
pub mod traits;
pub mod types;

pub use config::{
    FinancialBackendConfig, FinancialProvider, GeneralBackendConfig, GeneralProvider,
    SentimentConfig, TeiClassifierConfig,
};
pub use error::SentimentError;
pub use factory::{build_financial_classifier, build_polarity_analyzer};
pub use fallback::keyword_polarity;
pub use providers::{LexiconAnalyzer, TeiFinancialClassifier};
pub use scorer::{BackendState, SentimentScorer};
pub use traits::{FinancialClassifier, PolarityAnalyzer};
pub use types::ClassProbabilities;
