/// Model client — the single point of entry for all Replicate calls in Jobsift.
///
/// ARCHITECTURAL RULE: No other module may call the Replicate API directly.
/// All model interactions MUST go through this module.
///
/// Model: deepseek-ai/deepseek-v3.1 (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const REPLICATE_API_URL: &str = "https://api.replicate.com/v1";
/// The model used for all extraction calls in Jobsift.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "deepseek-ai/deepseek-v3.1";
const POLL_INTERVAL_MS: u64 = 1500;
const MAX_POLLS: u32 = 60;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited by the model API")]
    RateLimited,

    #[error("prediction {id} still running after {polls} polls")]
    Timeout { id: String, polls: u32 },

    #[error("prediction failed: {0}")]
    Failed(String),

    #[error("model returned empty output")]
    EmptyContent,
}

/// A text-generation capability: submit a prompt with an output-token budget,
/// receive the model's concatenated text. Implementations make exactly one
/// logical model call per invocation — retry policy belongs to
/// `extraction::retry`, not here.
///
/// Carried in `AppState` as `Arc<dyn ModelInvoker>`.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn complete(&self, prompt: &str, max_new_tokens: u32) -> Result<String, ModelError>;
}

#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    input: PredictionInput<'a>,
}

#[derive(Debug, Serialize)]
struct PredictionInput<'a> {
    prompt: &'a str,
    max_new_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    id: String,
    status: String,
    #[serde(default)]
    output: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
    urls: PredictionUrls,
}

#[derive(Debug, Deserialize)]
struct PredictionUrls {
    get: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: String,
}

/// The single Replicate client shared by every handler.
/// Constructed once at startup and injected through `AppState`.
#[derive(Clone)]
pub struct ReplicateClient {
    client: Client,
    api_token: String,
}

impl ReplicateClient {
    pub fn new(api_token: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_token,
        }
    }

    async fn create_prediction(
        &self,
        prompt: &str,
        max_new_tokens: u32,
    ) -> Result<Prediction, ModelError> {
        let request_body = PredictionRequest {
            input: PredictionInput {
                prompt,
                max_new_tokens,
            },
        };

        let response = self
            .client
            .post(format!("{REPLICATE_API_URL}/models/{MODEL}/predictions"))
            .bearer_auth(&self.api_token)
            // Hold the connection until the prediction finishes or the
            // server-side wait cap is hit; leftover states are polled below.
            .header("Prefer", "wait")
            .json(&request_body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn poll_prediction(&self, url: &str) -> Result<Prediction, ModelError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn parse_response(response: reqwest::Response) -> Result<Prediction, ModelError> {
        let status = response.status();

        if status.as_u16() == 429 {
            return Err(ModelError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Replicate error bodies carry a "detail" message
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.detail)
                .unwrap_or(body);
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ModelInvoker for ReplicateClient {
    async fn complete(&self, prompt: &str, max_new_tokens: u32) -> Result<String, ModelError> {
        let mut prediction = self.create_prediction(prompt, max_new_tokens).await?;

        let mut polls = 0;
        while matches!(prediction.status.as_str(), "starting" | "processing") {
            if polls >= MAX_POLLS {
                return Err(ModelError::Timeout {
                    id: prediction.id,
                    polls,
                });
            }
            polls += 1;
            tokio::time::sleep(std::time::Duration::from_millis(POLL_INTERVAL_MS)).await;
            prediction = self.poll_prediction(&prediction.urls.get).await?;
        }

        match prediction.status.as_str() {
            "succeeded" => {
                let text = concat_output(prediction.output.as_ref());
                debug!(
                    "prediction {} succeeded ({} chars of output)",
                    prediction.id,
                    text.len()
                );
                if text.is_empty() {
                    Err(ModelError::EmptyContent)
                } else {
                    Ok(text)
                }
            }
            other => {
                let message = match prediction.error.as_ref() {
                    Some(Value::String(s)) => s.clone(),
                    Some(v) => v.to_string(),
                    None => format!("prediction ended with status {other}"),
                };
                Err(ModelError::Failed(message))
            }
        }
    }
}

/// Replicate streams model output as a list of text chunks; some models return
/// one plain string instead. Either way the caller gets a single trimmed string.
fn concat_output(output: Option<&Value>) -> String {
    match output {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Array(chunks)) => chunks
            .iter()
            .filter_map(|c| c.as_str())
            .collect::<String>()
            .trim()
            .to_string(),
        _ => String::new(),
    }
}
