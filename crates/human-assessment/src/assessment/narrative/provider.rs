use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::NarrativeServiceError;
use crate::config::NarrativeConfig;

/// One text-generation call: a prompt plus the sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Outbound text-generation hook, swappable for fakes in tests.
#[async_trait]
pub trait NarrativeProvider: Send + Sync {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, NarrativeServiceError>;
}

/// Chat-completions client for OpenAI and compatible gateways.
pub struct OpenAiCompatibleProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiCompatibleProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NarrativeServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| NarrativeServiceError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl NarrativeProvider for OpenAiCompatibleProvider {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, NarrativeServiceError> {
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| NarrativeServiceError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NarrativeServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| NarrativeServiceError::MalformedResponse(err.to_string()))?;

        extract_text(completion)
    }
}

fn extract_text(completion: ChatCompletionResponse) -> Result<String, NarrativeServiceError> {
    let content = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| NarrativeServiceError::MalformedResponse("no choices returned".to_string()))?
        .message
        .content
        .unwrap_or_default();

    let text = content.trim();
    if text.is_empty() {
        Err(NarrativeServiceError::EmptyResponse)
    } else {
        Ok(text.to_string())
    }
}

/// Stand-in used when no API key is configured; every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredProvider;

#[async_trait]
impl NarrativeProvider for UnconfiguredProvider {
    async fn generate(&self, _request: &NarrativeRequest) -> Result<String, NarrativeServiceError> {
        Err(NarrativeServiceError::Unconfigured)
    }
}

pub fn provider_from_config(config: &NarrativeConfig) -> Arc<dyn NarrativeProvider> {
    let Some(api_key) = config.api_key.as_deref() else {
        info!("NARRATIVE_API_KEY not set; reports will carry the fallback narrative");
        return Arc::new(UnconfiguredProvider);
    };

    match OpenAiCompatibleProvider::new(config.api_base.as_str(), api_key, config.timeout) {
        Ok(provider) => {
            info!(api_base = %config.api_base, model = %config.model, "narrative provider ready");
            Arc::new(provider)
        }
        Err(err) => {
            warn!(error = %err, "unable to build narrative client; using fallback narrative");
            Arc::new(UnconfiguredProvider)
        }
    }
}
