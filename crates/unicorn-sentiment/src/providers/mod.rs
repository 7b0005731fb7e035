pub mod lexicon;
pub mod tei;

pub use lexicon::LexiconAnalyzer;
pub use tei::TeiFinancialClassifier;
