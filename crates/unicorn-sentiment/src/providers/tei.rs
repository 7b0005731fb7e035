use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;
use tokio::runtime::Runtime;

use crate::config::TeiClassifierConfig;
use crate::error::SentimentError;
use crate::traits::FinancialClassifier;
use crate::types::ClassProbabilities;

const REQUIRED_LABELS: [&str; 3] = ["negative", "neutral", "positive"];

/// Client for a text-embeddings-inference style sequence-classification
/// server. Owns a small runtime so callers stay synchronous; it refuses to
/// block when called from inside another Tokio runtime.
pub struct TeiFinancialClassifier {
    config: TeiClassifierConfig,
    client: Client,
    rt: Option<Runtime>,
    model_id: Option<String>,
}

impl TeiFinancialClassifier {
    /// Builds the client and probes `GET /info`. Fails when the server is
    /// unreachable or does not serve a negative/neutral/positive classifier.
    pub fn connect(config: TeiClassifierConfig) -> Result<Self, SentimentError> {
        if config.endpoint.trim().is_empty() {
            return Err(SentimentError::NotConfigured(
                "classifier endpoint is empty".to_string(),
            ));
        }
        ensure_blocking_context()?;
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("unicorn-tei")
            .enable_all()
            .build()?;
        let client = {
            let _guard = rt.enter();
            Client::builder().timeout(config.timeout).build()?
        };

        let mut classifier = Self {
            config,
            client,
            rt: Some(rt),
            model_id: None,
        };
        let info = classifier.block_on(classifier.fetch_info())?;
        classifier.model_id = validate_info(&info, classifier.config.expected_model.as_deref())?;
        tracing::info!(
            endpoint = %classifier.config.endpoint,
            model = classifier.model_id.as_deref().unwrap_or("unknown"),
            "financial classifier connected"
        );
        Ok(classifier)
    }

    pub fn model_id(&self) -> Option<&str> {
        self.model_id.as_deref()
    }

    fn block_on<T>(
        &self,
        fut: impl Future<Output = Result<T, SentimentError>>,
    ) -> Result<T, SentimentError> {
        ensure_blocking_context()?;
        let rt = self.rt.as_ref().ok_or_else(|| {
            SentimentError::NotConfigured("classifier runtime shut down".to_string())
        })?;
        rt.block_on(fut)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.endpoint.trim_end_matches('/'))
    }

    async fn fetch_info(&self) -> Result<InfoResponse, SentimentError> {
        let mut req = self.client.get(self.url("info"));
        if let Some(key) = &self.config.api_key {
            req = req.bearer_auth(key);
        }
        let res = req.send().await?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(SentimentError::Api { status, body });
        }
        Ok(res.json().await?)
    }

    async fn predict(&self, text: &str) -> Result<ClassProbabilities, SentimentError> {
        let payload = serde_json::json!({
            "inputs": truncate_chars(text, self.config.max_input_chars),
            "truncate": true,
        });

        let mut req = self.client.post(self.url("predict")).json(&payload);
        if let Some(key) = &self.config.api_key {
            req = req.bearer_auth(key);
        }
        let res = req.send().await?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(SentimentError::Api { status, body });
        }

        let parsed: PredictResponse = res.json().await?;
        let predictions = parsed.into_first().ok_or_else(|| {
            SentimentError::InvalidResponse("classifier returned no predictions".to_string())
        })?;
        ClassProbabilities::from_labels(predictions.iter().map(|p| (p.label.as_str(), p.score)))
    }
}

impl FinancialClassifier for TeiFinancialClassifier {
    fn name(&self) -> &'static str {
        "tei"
    }

    fn classify(&self, text: &str) -> Result<ClassProbabilities, SentimentError> {
        self.block_on(self.predict(text))
    }
}

impl Drop for TeiFinancialClassifier {
    fn drop(&mut self) {
        // dropping a runtime normally blocks, which panics inside async code
        if let Some(rt) = self.rt.take() {
            rt.shutdown_background();
        }
    }
}

fn ensure_blocking_context() -> Result<(), SentimentError> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(SentimentError::AsyncContext);
    }
    Ok(())
}

fn validate_info(
    info: &InfoResponse,
    expected_model: Option<&str>,
) -> Result<Option<String>, SentimentError> {
    let classifier = info
        .model_type
        .as_ref()
        .and_then(|t| t.classifier.as_ref())
        .ok_or_else(|| {
            SentimentError::InvalidResponse("server does not host a classifier".to_string())
        })?;

    let labels: Vec<String> = classifier
        .id2label
        .values()
        .map(|l| l.trim().to_ascii_lowercase())
        .collect();
    if let Some(missing) = REQUIRED_LABELS
        .iter()
        .find(|want| !labels.iter().any(|l| l == *want))
    {
        return Err(SentimentError::InvalidResponse(format!(
            "classifier has no `{missing}` label"
        )));
    }

    if let (Some(want), Some(got)) = (expected_model, info.model_id.as_deref()) {
        if !got.eq_ignore_ascii_case(want) {
            tracing::warn!(expected = want, served = got, "classifier model differs from configured");
        }
    }
    Ok(info.model_id.clone())
}

/// Cuts `text` to at most `max` characters on a char boundary.
pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text.get(..idx).unwrap_or(text),
        None => text,
    }
}

#[derive(Debug, Deserialize)]
struct InfoResponse {
    model_id: Option<String>,
    model_type: Option<ModelType>,
}

#[derive(Debug, Deserialize)]
struct ModelType {
    classifier: Option<ClassifierInfo>,
}

#[derive(Debug, Deserialize)]
struct ClassifierInfo {
    #[serde(default)]
    id2label: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictResponse {
    Single(Vec<Prediction>),
    Batch(Vec<Vec<Prediction>>),
}

impl PredictResponse {
    fn into_first(self) -> Option<Vec<Prediction>> {
        match self {
            Self::Single(p) if !p.is_empty() => Some(p),
            Self::Single(_) => None,
            Self::Batch(b) => b.into_iter().next().filter(|p| !p.is_empty()),
        }
    }
}
