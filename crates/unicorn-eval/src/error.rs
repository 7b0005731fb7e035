use thiserror::Error;
use unicorn_core::PolicyError;

#[derive(Debug, Error)]
pub enum EvalError {
    /// The profile document is not a JSON object. No metrics are produced.
    #[error("startup profile must be a JSON object: {0}")]
    StructuralInput(String),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("invalid scoring policy: {0}")]
    Policy(#[from] PolicyError),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}
