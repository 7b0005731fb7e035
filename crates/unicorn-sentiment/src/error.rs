use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    /// The backend was switched off or left without the settings it needs.
    #[error("backend not configured: {0}")]
    NotConfigured(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A blocking backend was called on a thread driving a Tokio runtime.
    #[error("blocking backend called inside an async runtime; run evaluation in spawn_blocking")]
    AsyncContext,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("backend returned invalid response: {0}")]
    InvalidResponse(String),

    #[error("backend API error: status={status}, body={body}")]
    Api { status: u16, body: String },

    #[error("lexicon error: {0}")]
    Lexicon(String),
}

impl SentimentError {
    /// Failures that will repeat for every later call: the backend should be
    /// switched off rather than retried per text.
    pub fn disables_backend(&self) -> bool {
        match self {
            Self::Http(err) => !err.is_decode() && !err.is_status(),
            Self::AsyncContext => true,
            _ => false,
        }
    }
}
