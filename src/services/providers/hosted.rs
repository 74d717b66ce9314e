/// Hosted inference provider
///
/// Thin client for a Hugging Face style text-generation endpoint:
/// POST {base}/models/{model_id} with a bearer credential and an
/// `{inputs, parameters}` body. The endpoint answers with one of several
/// JSON shapes depending on model and parameters; all of them are
/// normalized into a plain ordered list of texts at this boundary.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    config::Env,
    error::{AppError, AppResult},
    models::GenerationOptions,
};

const GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Clone)]
pub struct HostedInferenceClient {
    http_client: HttpClient,
    api_token: String,
    api_url: String,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationOptions,
}

/// Wire shapes the endpoint is known to answer with
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceReply {
    Single(GeneratedRecord),
    Batch(Vec<BatchItem>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BatchItem {
    Record(GeneratedRecord),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct GeneratedRecord {
    generated_text: String,
}

impl InferenceReply {
    /// Flattens any accepted reply shape into ordered texts
    fn into_texts(self) -> Vec<String> {
        match self {
            InferenceReply::Single(record) => vec![record.generated_text],
            InferenceReply::Batch(items) => items
                .into_iter()
                .map(|item| match item {
                    BatchItem::Record(record) => record.generated_text,
                    BatchItem::Text(text) => text,
                })
                .collect(),
        }
    }
}

impl HostedInferenceClient {
    pub fn new(api_token: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_token,
            api_url,
        }
    }

    /// Creates a client from the environment credential
    ///
    /// A missing or empty token means hosted inference is unavailable;
    /// the caller disables the hosted option rather than aborting.
    pub fn from_env(env: &Env) -> AppResult<Self> {
        let token = env
            .huggingface_api_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                AppError::BackendUnavailable(
                    "HUGGINGFACE_API_TOKEN not set; hosted inference disabled".to_string(),
                )
            })?;

        Ok(Self::new(token.to_string(), env.hf_api_url.clone()))
    }

    /// Requests continuations of `prompt` from the hosted model
    ///
    /// Unset optional parameters are omitted from the request body, and
    /// the reply shape is normalized before anything downstream sees it.
    pub async fn generate(
        &self,
        model_id: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> AppResult<Vec<String>> {
        let url = format!("{}/models/{}", self.api_url, model_id);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&InferenceRequest {
                inputs: prompt,
                parameters: options,
            })
            .timeout(GENERATION_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Generation(format!(
                "hosted inference returned status {}: {}",
                status, body
            )));
        }

        let reply: InferenceReply = response.json().await.map_err(|e| {
            AppError::Generation(format!("unrecognized hosted inference reply: {}", e))
        })?;

        let texts = reply.into_texts();
        tracing::info!(
            model = %model_id,
            generations = texts.len(),
            "Hosted inference completed"
        );

        Ok(texts)
    }
}
